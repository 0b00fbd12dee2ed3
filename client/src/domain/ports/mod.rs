//! Domain ports describing the collaborators the core relies on.
//!
//! The identity provider and navigator are driven by the host shell; the
//! booking service is a driven adapter over the remote API.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_service;
mod identity_provider;
mod navigator;

#[cfg(test)]
pub use booking_service::MockBookingService;
pub use booking_service::{BookingService, BookingServiceError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityUpdates};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::Navigator;
