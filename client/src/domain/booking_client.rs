//! Booking operations wrapped in a shared request lifecycle.
//!
//! One [`BookingClient`] backs one booking view: its four operations share a
//! single [`RequestLifecycle`], so the view renders one loading flag and one
//! error line regardless of which call is running.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::domain::ports::{BookingService, BookingServiceError};
use crate::domain::{
    AvailableSlots, Booking, BookingConfirmation, BookingReference, BookingRequest,
    RequestFailure, RequestLifecycle, RequestState, Service, TenantId,
};

/// Message shown when fetching the service catalogue fails without detail.
pub const FETCH_SERVICES_FAILED: &str = "Failed to fetch services";
/// Message shown when submitting a booking fails without detail.
pub const SUBMIT_BOOKING_FAILED: &str = "Failed to submit booking";
/// Message shown when fetching available slots fails without detail.
pub const FETCH_SLOTS_FAILED: &str = "Failed to fetch available slots";
/// Message shown when a reference lookup fails without detail.
pub const FETCH_BOOKING_FAILED: &str = "Failed to fetch booking";

/// Failure type returned by every [`BookingClient`] operation.
pub type BookingFailure = RequestFailure<BookingServiceError>;

/// Booking operations sharing one loading/error state.
pub struct BookingClient<S: ?Sized> {
    service: Arc<S>,
    lifecycle: RequestLifecycle,
}

impl<S> BookingClient<S>
where
    S: BookingService + ?Sized,
{
    /// Create a client over a booking service adapter.
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            lifecycle: RequestLifecycle::new(),
        }
    }

    /// Current loading/error state.
    pub fn state(&self) -> RequestState {
        self.lifecycle.state()
    }

    /// Subscribe to loading/error transitions.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.lifecycle.subscribe()
    }

    /// Fetch the service catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`BookingFailure`] when the remote call fails.
    pub async fn fetch_services(&self) -> Result<Vec<Service>, BookingFailure> {
        self.lifecycle
            .run("fetch_services", FETCH_SERVICES_FAILED, || {
                self.service.fetch_services()
            })
            .await
    }

    /// Submit a booking.
    ///
    /// # Errors
    ///
    /// Returns [`BookingFailure`] when the remote call fails; callers use it
    /// to keep the form open.
    pub async fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingFailure> {
        self.lifecycle
            .run("submit_booking", SUBMIT_BOOKING_FAILED, || {
                self.service.submit_booking(request)
            })
            .await
    }

    /// Fetch the slots offered by `tenant` on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingFailure`] when the remote call fails.
    pub async fn fetch_available_slots(
        &self,
        date: NaiveDate,
        tenant: &TenantId,
    ) -> Result<AvailableSlots, BookingFailure> {
        self.lifecycle
            .run("fetch_available_slots", FETCH_SLOTS_FAILED, || {
                self.service.fetch_available_slots(date, tenant)
            })
            .await
    }

    /// Look up a booking by reference.
    ///
    /// # Errors
    ///
    /// Returns [`BookingFailure`] when the remote call fails.
    pub async fn fetch_booking_by_reference(
        &self,
        reference: &BookingReference,
    ) -> Result<Booking, BookingFailure> {
        self.lifecycle
            .run("fetch_booking_by_reference", FETCH_BOOKING_FAILED, || {
                self.service.fetch_booking(reference)
            })
            .await
    }
}

#[cfg(test)]
#[path = "booking_client_tests.rs"]
mod tests;
