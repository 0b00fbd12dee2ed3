//! Driven port for the remote booking API.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    AvailableSlots, Booking, BookingConfirmation, BookingReference, BookingRequest,
    FailureMessage, Service, TenantId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking service adapters.
    pub enum BookingServiceError {
        /// The service rejected the call and explained why.
        Api {
            /// HTTP status code.
            status: u16,
            /// Message taken from the failure payload.
            message: String,
        } => "booking service rejected the request ({status}): {message}",
        /// The service rejected the call without a usable message.
        Status {
            /// HTTP status code.
            status: u16,
        } => "booking service responded with status {status}",
        /// The service could not be reached.
        Transport {
            /// Transport failure description.
            message: String,
        } => "booking service transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout {
            /// Timeout description.
            message: String,
        } => "booking service timed out: {message}",
        /// The response body did not match the expected shape.
        Decode {
            /// Decoding failure description.
            message: String,
        } => "booking service response could not be decoded: {message}",
        /// The request could not be built from the supplied arguments.
        InvalidRequest {
            /// Validation failure description.
            message: String,
        } => "booking service request is invalid: {message}",
    }
}

impl FailureMessage for BookingServiceError {
    fn payload_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Remote booking operations used by the booking pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Fetch the catalogue of bookable services.
    async fn fetch_services(&self) -> Result<Vec<Service>, BookingServiceError>;

    /// Submit a booking and return the service's confirmation.
    async fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingServiceError>;

    /// Fetch the slots offered by `tenant` on `date`.
    async fn fetch_available_slots(
        &self,
        date: NaiveDate,
        tenant: &TenantId,
    ) -> Result<AvailableSlots, BookingServiceError>;

    /// Look up a booking by its customer-facing reference.
    async fn fetch_booking(
        &self,
        reference: &BookingReference,
    ) -> Result<Booking, BookingServiceError>;
}
