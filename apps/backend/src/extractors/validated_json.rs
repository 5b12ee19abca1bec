use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::FailureSignal;
use crate::errors::domain::DomainFailure;
use crate::errors::messages;
use crate::logging::pii::{bounded_preview, Redacted};
use crate::request_ctx;
use crate::validation::Validate;

/// Largest body `ValidatedJson` will buffer.
pub const BODY_LIMIT: usize = 256 * 1024;

/// Field name reported when a type mismatch has no path (the root value).
const ROOT_FIELD: &str = "body";

/// JSON body extractor that classifies every binding failure and then runs
/// the DTO's [`Validate`] rules.
///
/// Empty or cut-off bodies become `Truncated`, malformed JSON becomes
/// `Syntax`, and a value of the wrong type becomes `TypeMismatch` naming the
/// dotted path of the offending field.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = FailureSignal;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);
        let mut payload = payload.take();

        Box::pin(async move {
            if let Some(content_type) = content_type.as_deref() {
                if !is_json_content_type(content_type) {
                    return Err(DomainFailure::new(
                        actix_web::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        messages::UNSUPPORTED_CONTENT_TYPE,
                    )
                    .into());
                }
            }

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(
                        request_id = %request_ctx::request_id(),
                        error = %e,
                        "Failed to read request body chunk"
                    );
                    FailureSignal::truncated(e.to_string())
                })?;
                if body.len() + chunk.len() > BODY_LIMIT {
                    return Err(DomainFailure::payload_too_large().into());
                }
                body.extend_from_slice(&chunk);
            }

            let value = bind::<T>(&body)?;
            Ok(ValidatedJson(value))
        })
    }
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Deserialize `body` into `T` and run its validation rules.
pub fn bind<T>(body: &[u8]) -> Result<T, FailureSignal>
where
    T: DeserializeOwned + Validate,
{
    let value = deserialize::<T>(body)?;
    value.validate().map_err(FailureSignal::from_violations)?;
    Ok(value)
}

fn deserialize<T: DeserializeOwned>(body: &[u8]) -> Result<T, FailureSignal> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FailureSignal::truncated("empty request body"));
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|e| {
        let path = e.path().to_string();
        classify(e.inner(), Some(path))
    })?;
    de.end().map_err(|e| classify(&e, None))?;
    Ok(value)
}

/// Map a serde_json error to its `MalformedBody` kind.
///
/// `path` is the location of a type mismatch when known; `"."` and `None`
/// both mean the root value.
pub fn classify(error: &serde_json::Error, path: Option<String>) -> FailureSignal {
    let detail = bounded_preview(&Redacted(&error.to_string()).to_string(), 200);
    debug!(
        request_id = %request_ctx::request_id(),
        category = ?error.classify(),
        error = %detail,
        "JSON binding failed"
    );

    match error.classify() {
        Category::Eof => FailureSignal::truncated(detail),
        Category::Syntax => FailureSignal::syntax(detail),
        Category::Data => {
            let field = path
                .filter(|p| !p.is_empty() && p != ".")
                .unwrap_or_else(|| ROOT_FIELD.to_string());
            FailureSignal::type_mismatch(field, detail)
        }
        Category::Io => FailureSignal::unknown(detail),
    }
}

/// Error handler for actix's own `web::Json` extractor.
///
/// Failures get the same categories and messages as `ValidatedJson`, except
/// that actix does not expose the path of a type mismatch: those always name
/// the root (`invalid value for body`). Routes that need the field named bind
/// with `ValidatedJson`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let signal = match err {
        JsonPayloadError::Deserialize(e) => classify(&e, None),
        JsonPayloadError::ContentType => DomainFailure::new(
            actix_web::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            messages::UNSUPPORTED_CONTENT_TYPE,
        )
        .into(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            DomainFailure::payload_too_large().into()
        }
        other => FailureSignal::truncated(other.to_string()),
    };
    signal.into()
}
