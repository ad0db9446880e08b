//! The normalized result of one CRM call.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::http::HttpResponse;

/// Status code plus parsed JSON payload.
///
/// An empty body becomes an empty JSON array so callers can always treat
/// the payload as a value. Remote rejections (status >= 400) are ordinary
/// envelopes; check [`Response::is_successful`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    payload: Value,
}

impl Response {
    pub fn new(status: u16, body: &str) -> Result<Self> {
        let payload = if body.is_empty() {
            Value::Array(Vec::new())
        } else {
            serde_json::from_str(body).map_err(|source| {
                tracing::warn!(status, error = %source, "response body is not JSON");
                ApiError::MalformedResponse { status, source }
            })?
        };
        Ok(Self { status, payload })
    }

    /// Like [`Response::new`] for transports that report the status as text.
    pub fn from_raw_status(status: &str, body: &str) -> Result<Self> {
        let code = status
            .trim()
            .parse::<u16>()
            .map_err(|_| ApiError::InvalidStatus(status.to_string()))?;
        Self::new(code, body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// True when the status is below 400.
    pub fn is_successful(&self) -> bool {
        self.status < 400
    }

    /// The CRM's `errorMsg`, if the payload has one.
    pub fn error_message(&self) -> Option<&str> {
        self.payload.get("errorMsg").and_then(Value::as_str)
    }

    /// Deserialize the payload into a caller-defined type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.payload.clone()).map_err(|source| ApiError::MalformedResponse {
            status: self.status,
            source,
        })
    }
}

impl TryFrom<HttpResponse> for Response {
    type Error = ApiError;

    fn try_from(response: HttpResponse) -> Result<Self> {
        Self::new(response.status, &response.body)
    }
}
