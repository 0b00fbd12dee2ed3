//! Domain primitives, access rules and request orchestration.
//!
//! Purpose: keep the gating and request logic free of transport and UI
//! concerns. Collaborators (identity, navigation, the booking API) are
//! reached through the traits in [`ports`].
//!
//! Public surface:
//! - `IdentitySnapshot`, `RoutePath` and the role/route constants.
//! - `AccessRequirement` and `evaluate`: the access predicate.
//! - `RouteGuard`, `GuardSession` and the guard policies.
//! - `RequestLifecycle` and `BookingClient`: loading/error tracking around
//!   booking calls.
//! - `CountdownState` and `CountdownTimer`: promotion countdowns.

pub mod access;
pub mod booking;
pub mod booking_client;
pub mod countdown;
pub mod guard;
pub mod identity;
pub mod ports;
pub mod request_lifecycle;
pub mod route_path;

pub use self::access::{AccessRequirement, GuardDecision, evaluate};
pub use self::booking::{
    AvailableSlots, Booking, BookingConfirmation, BookingReference, BookingRequest,
    BookingValidationError, CustomerDetails, Service, TenantId, TimeSlot,
};
pub use self::booking_client::{
    BookingClient, BookingFailure, FETCH_BOOKING_FAILED, FETCH_SERVICES_FAILED,
    FETCH_SLOTS_FAILED, SUBMIT_BOOKING_FAILED,
};
pub use self::countdown::{
    CountdownDisplay, CountdownState, CountdownTimer, TickSleeper, TokioSleeper, Urgency,
    format_remaining, seconds_until,
};
pub use self::guard::{
    ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE, DenialNotice, DenialPolicy, GuardPolicy,
    GuardSession, GuardState, GuardView, PERMISSION_DENIED_MESSAGE, RedirectRule, RouteGuard,
};
pub use self::identity::{
    ADMIN_AREA_ROLES, IdentityId, IdentitySnapshot, IdentityValidationError, ROLE_ADMIN,
    ROLE_CUSTOMER, ROLE_MANAGER, ROLE_OWNER, ROLE_RECEPTIONIST, ROLE_STAFF, STAFF_AREA_ROLES,
};
pub use self::request_lifecycle::{
    FailureMessage, RequestFailure, RequestLifecycle, RequestState,
};
pub use self::route_path::{
    ADMIN_DASHBOARD, ADMIN_USERS, CUSTOMER_DASHBOARD, DEFAULT_FALLBACK, RoutePath,
    RoutePathValidationError,
};
