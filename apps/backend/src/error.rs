use std::error::Error as StdError;

use thiserror::Error;

use crate::errors::domain::DomainFailure;
use crate::http::envelope::FieldError;
use crate::validation::time_layout::TimeLayout;
use crate::validation::Violation;

/// How a request body failed to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedBody {
    /// Not well-formed JSON. `detail` is the parser message, for logs only.
    Syntax { detail: String },
    /// Well-formed JSON whose value at `field` has the wrong type.
    TypeMismatch { field: String, detail: String },
    /// Empty body, or the body ended before the document did.
    Truncated { detail: String },
}

/// Closed set of classified failures produced anywhere in the pipeline.
///
/// Every stage maps its own faults into one of these variants at the point of
/// failure; the translator in [`crate::errors::translate`] is the only place
/// that turns a signal into a client response.
#[derive(Error, Debug)]
pub enum FailureSignal {
    #[error("validation failed for {} field(s)", .0.len())]
    ValidationFailure(Vec<FieldError>),
    #[error("malformed body: {0:?}")]
    MalformedBody(MalformedBody),
    #[error("expected time in format {}, got {got:?}", .expected.readable())]
    TimeParseFailure { expected: TimeLayout, got: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("request deadline exceeded")]
    Timeout,
    #[error(transparent)]
    Domain(#[from] DomainFailure),
    #[error("unknown failure: {0}")]
    Unknown(Box<dyn StdError + Send + Sync + 'static>),
}

impl FailureSignal {
    /// Build a validation failure with one entry per failing field.
    ///
    /// Fields whose name resolves to nothing are dropped; when a field fails
    /// several rules only the first one is reported.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let mut errors: Vec<FieldError> = Vec::with_capacity(violations.len());
        for violation in violations {
            let Some(field) = violation.field.resolve() else {
                continue;
            };
            if errors.iter().any(|existing| existing.field == field) {
                continue;
            }
            errors.push(FieldError {
                field: field.to_string(),
                message: violation.message(),
            });
        }
        Self::ValidationFailure(errors)
    }

    pub fn syntax(detail: impl Into<String>) -> Self {
        Self::MalformedBody(MalformedBody::Syntax {
            detail: detail.into(),
        })
    }

    pub fn type_mismatch(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedBody(MalformedBody::TypeMismatch {
            field: field.into(),
            detail: detail.into(),
        })
    }

    pub fn truncated(detail: impl Into<String>) -> Self {
        Self::MalformedBody(MalformedBody::Truncated {
            detail: detail.into(),
        })
    }

    pub fn time_parse(expected: TimeLayout, got: impl Into<String>) -> Self {
        Self::TimeParseFailure {
            expected,
            got: got.into(),
        }
    }

    pub fn unknown(cause: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self::Unknown(cause.into())
    }

    /// The internal cause worth logging. Never sent to the client.
    pub fn original_cause(&self) -> String {
        match self {
            Self::Domain(failure) => failure.original_message(),
            Self::Unknown(cause) => cause.to_string(),
            Self::MalformedBody(
                MalformedBody::Syntax { detail }
                | MalformedBody::TypeMismatch { detail, .. }
                | MalformedBody::Truncated { detail },
            ) => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Result of running the downstream stage under the deadline guard.
///
/// Internal to the pipeline; it is never serialized. A `Completed` value is
/// passed through verbatim, a `Failed` one goes through the translator.
#[derive(Debug)]
pub enum PipelineOutcome<T> {
    Completed(T),
    Failed(FailureSignal),
}

impl<T> PipelineOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn into_result(self) -> Result<T, FailureSignal> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Failed(signal) => Err(signal),
        }
    }
}
