#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod pipeline;
pub mod request_ctx;
pub mod routes;
pub mod telemetry;
pub mod validation;

// Re-exports for public API
pub use auth::{Claims, JwtSigner, Signer, SignerError, SubjectId};
pub use config::{Config, ConfigError};
pub use error::{FailureSignal, MalformedBody, PipelineOutcome};
pub use errors::{translate, DomainFailure};
pub use extractors::{CurrentSubject, PageQuery, ValidatedJson};
pub use http::{FieldError, PageMetaData, ResponseEnvelope};
pub use middleware::{AccessLogger, DeadlineGuard, RequestDeadline, RequestId, TokenVerifier};
pub use pipeline::Pipeline;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
