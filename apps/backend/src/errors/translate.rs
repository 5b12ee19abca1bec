//! The one place a `FailureSignal` becomes a status code and an envelope.

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use crate::error::{FailureSignal, MalformedBody};
use crate::errors::messages;
use crate::http::envelope::ResponseEnvelope;

/// Map a failure to its status and client envelope.
///
/// Total and pure: every variant has exactly one row and no internal cause
/// text is ever copied into the envelope.
pub fn translate(signal: &FailureSignal) -> (StatusCode, ResponseEnvelope<()>) {
    match signal {
        FailureSignal::ValidationFailure(errors) => (
            StatusCode::BAD_REQUEST,
            ResponseEnvelope::invalid(messages::VALIDATION, errors.clone()),
        ),
        FailureSignal::MalformedBody(MalformedBody::Syntax { .. }) => (
            StatusCode::BAD_REQUEST,
            ResponseEnvelope::failure(messages::JSON_SYNTAX),
        ),
        FailureSignal::MalformedBody(MalformedBody::TypeMismatch { field, .. }) => (
            StatusCode::BAD_REQUEST,
            ResponseEnvelope::failure(messages::invalid_value_for(field)),
        ),
        FailureSignal::MalformedBody(MalformedBody::Truncated { .. }) => (
            StatusCode::BAD_REQUEST,
            ResponseEnvelope::failure(messages::MISSING_BODY),
        ),
        FailureSignal::TimeParseFailure { expected, got } => (
            StatusCode::BAD_REQUEST,
            ResponseEnvelope::failure(messages::time_format_with_value(expected.readable(), got)),
        ),
        FailureSignal::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ResponseEnvelope::failure(messages::UNAUTHORIZED),
        ),
        FailureSignal::Domain(failure) => (
            failure.code(),
            ResponseEnvelope::failure(failure.display_message()),
        ),
        FailureSignal::Timeout => (
            StatusCode::REQUEST_TIMEOUT,
            ResponseEnvelope::failure(messages::REQUEST_TIMEOUT),
        ),
        FailureSignal::Unknown(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ResponseEnvelope::failure(messages::INTERNAL_SERVER_ERROR),
        ),
    }
}

impl ResponseError for FailureSignal {
    fn status_code(&self) -> StatusCode {
        translate(self).0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, envelope) = translate(self);
        HttpResponse::build(status).json(envelope)
    }
}
