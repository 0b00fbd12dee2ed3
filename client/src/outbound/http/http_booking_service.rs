//! Reqwest-backed booking service adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::dto::ErrorPayloadDto;
use crate::domain::ports::{BookingService, BookingServiceError};
use crate::domain::{
    AvailableSlots, Booking, BookingConfirmation, BookingReference, BookingRequest, Service,
    TenantId,
};

const SERVICES_PATH: &str = "services";
const BOOKINGS_PATH: &str = "bookings";
const SLOTS_PATH: &str = "slots";

/// Booking service adapter talking JSON over HTTP to one API base URL.
pub struct HttpBookingService {
    client: Client,
    base_url: Url,
}

impl HttpBookingService {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// Endpoints resolve below `base_url`, so `http://host/api/` yields
    /// `http://host/api/services`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL every endpoint resolves against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, BookingServiceError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "booking service responded");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref())
    }
}

#[async_trait]
impl BookingService for HttpBookingService {
    async fn fetch_services(&self) -> Result<Vec<Service>, BookingServiceError> {
        let url = endpoint(&self.base_url, &[SERVICES_PATH])?;
        self.send(self.client.get(url)).await
    }

    async fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingServiceError> {
        let url = endpoint(&self.base_url, &[BOOKINGS_PATH])?;
        self.send(self.client.post(url).json(request)).await
    }

    async fn fetch_available_slots(
        &self,
        date: NaiveDate,
        tenant: &TenantId,
    ) -> Result<AvailableSlots, BookingServiceError> {
        let url = slots_endpoint(&self.base_url, date, tenant)?;
        self.send(self.client.get(url)).await
    }

    async fn fetch_booking(
        &self,
        reference: &BookingReference,
    ) -> Result<Booking, BookingServiceError> {
        let url = endpoint(&self.base_url, &[BOOKINGS_PATH, reference.as_ref()])?;
        self.send(self.client.get(url)).await
    }
}

/// Append `segments` to the base path, percent-encoding each one.
fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, BookingServiceError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            BookingServiceError::invalid_request(format!(
                "base URL {base_url} cannot carry a path"
            ))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn slots_endpoint(
    base_url: &Url,
    date: NaiveDate,
    tenant: &TenantId,
) -> Result<Url, BookingServiceError> {
    let mut url = endpoint(base_url, &[SLOTS_PATH])?;
    url.query_pairs_mut()
        .append_pair("date", &date.format("%Y-%m-%d").to_string())
        .append_pair("tenantId", tenant.as_ref());
    Ok(url)
}

fn decode<T>(body: &[u8]) -> Result<T, BookingServiceError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| {
        BookingServiceError::decode(format!("invalid booking service payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> BookingServiceError {
    if error.is_timeout() {
        BookingServiceError::timeout(error.to_string())
    } else {
        BookingServiceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BookingServiceError {
    match ErrorPayloadDto::from_body(body).into_message() {
        Some(message) => BookingServiceError::api(status.as_u16(), message),
        None => BookingServiceError::status(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use rstest::rstest;

    use super::*;
    use crate::domain::FailureMessage;

    fn base() -> Url {
        Url::parse("http://localhost:8080/api/").expect("valid base URL")
    }

    #[rstest]
    #[case::services(&["services"], "http://localhost:8080/api/services")]
    #[case::bookings(&["bookings"], "http://localhost:8080/api/bookings")]
    #[case::lookup(&["bookings", "BK-42"], "http://localhost:8080/api/bookings/BK-42")]
    #[case::encoded(&["bookings", "BK/42 x"], "http://localhost:8080/api/bookings/BK%2F42%20x")]
    fn resolves_endpoints_below_base_path(#[case] segments: &[&str], #[case] expected: &str) {
        let url = endpoint(&base(), segments).expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn resolves_endpoints_without_trailing_slash_on_base() {
        let base = Url::parse("https://bookings.example.test/v1").expect("valid base URL");
        let url = endpoint(&base, &["services"]).expect("endpoint builds");
        assert_eq!(url.as_str(), "https://bookings.example.test/v1/services");
    }

    #[test]
    fn rejects_bases_that_cannot_carry_a_path() {
        let base = Url::parse("mailto:bookings@example.test").expect("valid URL");
        let error = endpoint(&base, &["services"]).expect_err("cannot-be-a-base URL");
        assert!(matches!(error, BookingServiceError::InvalidRequest { .. }));
    }

    #[test]
    fn slots_endpoint_carries_date_and_tenant_query() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).expect("date");
        let tenant = TenantId::new("salon & spa").expect("tenant");

        let url = slots_endpoint(&base(), date, &tenant).expect("endpoint builds");

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/slots?date=2026-03-04&tenantId=salon+%26+spa"
        );
    }

    #[rstest]
    #[case::payload_message(StatusCode::CONFLICT, br#"{"message":"Slot already taken"}"#.as_slice(), "Slot already taken")]
    #[case::padded_message(StatusCode::UNPROCESSABLE_ENTITY, br#"{"message":" Slot already taken "}"#.as_slice(), " Slot already taken ")]
    fn statuses_with_payload_message_map_to_api_errors(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, body);

        assert_eq!(error.payload_message(), Some(expected));
        assert!(matches!(error, BookingServiceError::Api { status: code, .. } if code == status.as_u16()));
    }

    #[rstest]
    #[case::empty(StatusCode::INTERNAL_SERVER_ERROR, b"".as_slice())]
    #[case::html(StatusCode::BAD_GATEWAY, b"<html>Bad Gateway</html>".as_slice())]
    #[case::blank_message(StatusCode::BAD_REQUEST, br#"{"message":""}"#.as_slice())]
    fn statuses_without_payload_message_map_to_status_errors(
        #[case] status: StatusCode,
        #[case] body: &[u8],
    ) {
        let error = map_status_error(status, body);

        assert_eq!(error, BookingServiceError::status(status.as_u16()));
        assert_eq!(error.payload_message(), None);
    }

    #[test]
    fn decodes_service_catalogue() {
        let body = r#"[
            { "id": "cut", "name": "Haircut", "durationMinutes": 30, "price": 25.0 },
            { "id": "colour", "name": "Colour", "description": "Full colour" }
        ]"#;

        let services: Vec<Service> = decode(body.as_bytes()).expect("catalogue decodes");

        assert_eq!(services.len(), 2);
        assert_eq!(services[0].duration_minutes, Some(30));
        assert_eq!(services[1].description.as_deref(), Some("Full colour"));
    }

    #[test]
    fn malformed_payloads_map_to_decode_errors() {
        let error = decode::<Booking>(br#"{"reference":""}"#).expect_err("decode fails");
        assert!(matches!(error, BookingServiceError::Decode { .. }));
        assert_eq!(error.payload_message(), None);
    }
}
