//! Business-level failures with a caller-chosen status and display message.
//!
//! A `DomainFailure` carries two different texts: the display message, which
//! is the only thing a client ever sees, and an internal cause chain, which is
//! only ever logged. Failures may wrap other failures; the translator always
//! uses the outermost display message while the access logger reports the
//! innermost non-domain cause.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use actix_web::http::StatusCode;

use crate::errors::messages;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug)]
pub struct DomainFailure {
    code: StatusCode,
    display: String,
    cause: Option<Cause>,
}

impl DomainFailure {
    pub fn new(code: StatusCode, display: impl Into<String>) -> Self {
        Self {
            code,
            display: display.into(),
            cause: None,
        }
    }

    /// Attach the internal cause. It is logged, never sent to the client.
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Wrap an existing failure under a new status and display message.
    pub fn wrap(inner: DomainFailure, code: StatusCode, display: impl Into<String>) -> Self {
        Self::new(code, display).with_cause(inner)
    }

    pub fn bad_request(display: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, display)
    }

    pub fn forbidden(display: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, display)
    }

    pub fn not_found(display: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, display)
    }

    pub fn conflict(display: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, display)
    }

    pub fn payload_too_large() -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, messages::PAYLOAD_TOO_LARGE)
    }

    /// A 500 that hides `cause` behind the generic server error message.
    pub fn internal(cause: impl Into<Cause>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            messages::INTERNAL_SERVER_ERROR,
        )
        .with_cause(cause)
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// The message sent to the client. Always the outermost configured one.
    pub fn display_message(&self) -> &str {
        &self.display
    }

    /// Walk nested domain failures down to the innermost non-domain cause.
    ///
    /// When the chain ends in a domain failure without a cause, that innermost
    /// failure is returned.
    pub fn original_error(&self) -> &(dyn StdError + 'static) {
        let mut current = self;
        loop {
            match current.cause.as_deref() {
                None => return current,
                Some(cause) => match cause.downcast_ref::<DomainFailure>() {
                    Some(inner) => current = inner,
                    None => return cause,
                },
            }
        }
    }

    pub fn original_message(&self) -> String {
        self.original_error().to_string()
    }
}

impl Display for DomainFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.display.is_empty() {
            match self.cause.as_deref() {
                Some(cause) => write!(f, "{cause}"),
                None => write!(f, "domain failure ({})", self.code.as_u16()),
            }
        } else {
            f.write_str(&self.display)
        }
    }
}

impl StdError for DomainFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}
