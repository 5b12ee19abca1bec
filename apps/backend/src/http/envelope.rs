//! The single JSON shape every response is serialized as.

use serde::{Deserialize, Serialize};

use super::paging::PageMetaData;

/// One failing field in a validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// `{message, data?, paging?, errors?}`
///
/// Built only through the constructors below, so `errors` never appears on a
/// success and `data` never appears next to `errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paging: Option<PageMetaData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            paging: None,
            errors: None,
        }
    }

    pub fn success_paged(message: impl Into<String>, data: T, paging: PageMetaData) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            paging: Some(paging),
            errors: None,
        }
    }

    /// Success or failure carrying only a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            paging: None,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::message_only(message)
    }

    /// Failure with field errors. An empty list is dropped from the output.
    pub fn invalid(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            message: message.into(),
            data: None,
            paging: None,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn paging(&self) -> Option<&PageMetaData> {
        self.paging.as_ref()
    }

    pub fn errors(&self) -> Option<&[FieldError]> {
        self.errors.as_deref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
