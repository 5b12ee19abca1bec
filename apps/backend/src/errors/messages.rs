//! Client-visible messages used by the error translator.
//!
//! These strings are part of the wire contract. Add new messages here; never
//! build ad-hoc client messages inside handlers or middleware.

/// Sent with every 500 response.
pub const INTERNAL_SERVER_ERROR: &str =
    "currently our server is facing unexpected error, please try again later";

/// Sent when the request body is empty or ends prematurely.
pub const MISSING_BODY: &str = "missing body request";

/// Sent when the request body is not well-formed JSON.
pub const JSON_SYNTAX: &str = "invalid JSON syntax";

/// Sent when the token verifier rejects a request.
pub const UNAUTHORIZED: &str = "unauthorized";

/// Sent when the deadline guard fires before the handler completes.
pub const REQUEST_TIMEOUT: &str = "failed to process request in time, please try again";

/// Sent alongside a populated `errors` list.
pub const VALIDATION: &str = "input validation error";

/// Sent on every successful response.
pub const SUCCESS: &str = "success";

/// Sent when the request body exceeds the configured limit.
pub const PAYLOAD_TOO_LARGE: &str = "request body is too large";

/// Sent when a JSON route receives another content type.
pub const UNSUPPORTED_CONTENT_TYPE: &str = "content type must be application/json";

/// `invalid value for {field}`
pub fn invalid_value_for(field: &str) -> String {
    format!("invalid value for {field}")
}

/// `please send time in format of {readable}, got: {value}`
pub fn time_format_with_value(readable: &str, value: &str) -> String {
    format!("please send time in format of {readable}, got: {value}")
}

/// `please send time in format of {readable}`
pub fn time_format(readable: &str) -> String {
    format!("please send time in format of {readable}")
}
