//! Booking catalogue and reservation payloads exchanged with the remote API.
//!
//! Serialisation contract: JSON with camelCase keys; calendar dates use
//! `YYYY-MM-DD`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for booking identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingValidationError {
    /// Tenant identifier was blank.
    #[error("tenant id must not be empty")]
    EmptyTenantId,
    /// Booking reference was blank.
    #[error("booking reference must not be empty")]
    EmptyReference,
}

/// Identifier of the business (tenant) a booking belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Validate and construct a [`TenantId`]; surrounding whitespace is
    /// trimmed.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BookingValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BookingValidationError::EmptyTenantId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = BookingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Customer-facing booking reference such as `BK-2024-0042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingReference(String);

impl BookingReference {
    /// Validate and construct a reference; surrounding whitespace is trimmed.
    ///
    /// # Examples
    /// ```
    /// use booking_client::domain::BookingReference;
    ///
    /// let reference = BookingReference::new("  BK-42 ").expect("valid reference");
    /// assert_eq!(reference.as_ref(), "BK-42");
    /// ```
    pub fn new(reference: impl AsRef<str>) -> Result<Self, BookingValidationError> {
        let trimmed = reference.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BookingValidationError::EmptyReference);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for BookingReference {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<BookingReference> for String {
    fn from(value: BookingReference) -> Self {
        value.0
    }
}

impl TryFrom<String> for BookingReference {
    type Error = BookingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bookable service offered by a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional marketing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Appointment length in minutes.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Price in the tenant's currency.
    #[serde(default)]
    pub price: Option<f64>,
}

/// Contact details captured by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    /// Full name.
    pub name: String,
    /// Email address for the confirmation.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Structured booking submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Tenant receiving the booking.
    pub tenant_id: TenantId,
    /// Service being booked.
    pub service_id: String,
    /// Appointment date.
    pub date: NaiveDate,
    /// Slot start time as offered by the slot listing (for example `09:30`).
    pub time: String,
    /// Customer contact details.
    pub customer: CustomerDetails,
    /// Free-form notes for the tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Confirmation returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    /// Reference the customer can later look the booking up by.
    pub reference: BookingReference,
    /// Status reported by the service, e.g. `confirmed` or `pending`.
    pub status: String,
    /// Optional human-readable message from the service.
    #[serde(default)]
    pub message: Option<String>,
}

/// One bookable time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Slot start time, e.g. `09:30`.
    pub time: String,
    /// Whether the slot can still be booked.
    #[serde(default = "slot_available_by_default")]
    pub available: bool,
}

fn slot_available_by_default() -> bool {
    true
}

/// Slot listing for one tenant and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlots {
    /// Date the slots belong to.
    pub date: NaiveDate,
    /// Slots in service order.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl AvailableSlots {
    /// Iterate over slots that can still be booked.
    pub fn open_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(|slot| slot.available)
    }
}

/// Booking as returned by a reference lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking reference.
    pub reference: BookingReference,
    /// Booked service identifier.
    pub service_id: String,
    /// Appointment date.
    pub date: NaiveDate,
    /// Appointment start time.
    pub time: String,
    /// Booking status, e.g. `confirmed` or `cancelled`.
    pub status: String,
    /// Customer contact details.
    pub customer: CustomerDetails,
}
