//! DTOs for decoding booking API failure payloads.

use serde::Deserialize;

/// Body returned by the booking API alongside a non-2xx status.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorPayloadDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorPayloadDto {
    /// Decode `body`, treating anything that is not a JSON object as an
    /// empty payload.
    pub(super) fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The payload message when it carries visible text.
    pub(super) fn into_message(self) -> Option<String> {
        self.message.filter(|message| !message.trim().is_empty())
    }
}
