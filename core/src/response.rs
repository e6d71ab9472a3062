//! Response wrapper returned by every client call.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// One HTTP response from the API, with its body parsed as JSON when it is
/// JSON.
///
/// The API wraps payloads in an envelope: `{"status":"ok","data":...}` on
/// success and `{"status":"error","error":{"code":..,"message":..,"data":..}}`
/// on failure. The accessors below read from that envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    raw: HttpResponse,
    json: Option<Value>,
}

impl ApiResponse {
    pub fn new(raw: HttpResponse) -> Self {
        let json = serde_json::from_str(&raw.body).ok();
        Self { raw, json }
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    /// True for 2xx statuses.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.raw.status)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.raw.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.raw.header(name)
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        &self.raw.body
    }

    /// The parsed body, or `None` if it was empty or not JSON.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// The `data` member of the envelope.
    pub fn data(&self) -> Option<&Value> {
        self.json.as_ref()?.get("data")
    }

    /// Deserializes the `data` member into `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let data = self
            .data()
            .ok_or_else(|| ApiError::Deserialization("response has no data member".to_string()))?;
        T::deserialize(data).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Human-readable message: `error.message`, falling back to a top-level
    /// `message`.
    pub fn message(&self) -> Option<&str> {
        let json = self.json.as_ref()?;
        json.pointer("/error/message")
            .or_else(|| json.get("message"))
            .and_then(Value::as_str)
    }

    /// Field-level validation detail from `error.data`, typically a map of
    /// field name to messages.
    pub fn validation_errors(&self) -> Option<&Value> {
        self.json.as_ref()?.pointer("/error/data")
    }

    pub fn into_inner(self) -> HttpResponse {
        self.raw
    }
}
