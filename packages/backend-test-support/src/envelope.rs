//! Readers for the backend's JSON response envelope.
//!
//! Mirrors the wire shape locally so tests do not depend on backend types.

use serde::Deserialize;
use serde_json::Value;

use crate::service::TestResponse;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldErrorLike {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeLike {
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub paging: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<FieldErrorLike>>,
}

/// Parse the body as an envelope, panicking with the raw body if it is not one.
pub fn read_envelope(response: &TestResponse) -> EnvelopeLike {
    serde_json::from_slice(&response.body).unwrap_or_else(|e| {
        panic!(
            "response body is not an envelope ({e}): {}",
            String::from_utf8_lossy(&response.body)
        )
    })
}

/// Assert status and message of a failure envelope with no `data`.
pub fn assert_failure(response: &TestResponse, status: u16, message: &str) -> EnvelopeLike {
    assert_eq!(
        response.status.as_u16(),
        status,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&response.body)
    );
    let envelope = read_envelope(response);
    assert_eq!(envelope.message, message);
    assert!(envelope.data.is_none(), "failure envelope carries data");
    envelope
}
