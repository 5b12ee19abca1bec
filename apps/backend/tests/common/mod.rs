#![allow(dead_code)]

pub mod proptest_prelude;

use actix_web::http::header::CONTENT_TYPE;
use backend::middleware::request_id::REQUEST_ID_HEADER;
use backend_test_support::envelope::{assert_failure, EnvelopeLike};
use backend_test_support::service::TestResponse;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert a failure envelope plus the headers every pipeline response has:
/// a JSON content type and a non-empty `x-request-id`.
pub fn assert_failure_envelope(resp: &TestResponse, status: u16, message: &str) -> EnvelopeLike {
    let content_type = resp.header(CONTENT_TYPE.as_str()).unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let request_id = resp.header(REQUEST_ID_HEADER).unwrap_or_default();
    assert!(!request_id.is_empty(), "x-request-id header should be present");

    assert_failure(resp, status, message)
}
