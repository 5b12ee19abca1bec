//! Locating the bearer credential on an incoming request.

use actix_web::http::header::{self, HeaderMap};
use actix_web::HttpRequest;

/// Cookie consulted when no `Authorization` header is sent.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// Neither header nor cookie carried a credential.
    Missing,
    /// An `Authorization` header was sent but is not `Bearer <token>`.
    MalformedHeader,
}

impl CredentialError {
    pub fn reason(self) -> &'static str {
        match self {
            CredentialError::Missing => "missing_credential",
            CredentialError::MalformedHeader => "malformed_authorization_header",
        }
    }
}

/// Parse an `Authorization` header value of exactly `Bearer <token>`.
pub fn parse_bearer(value: &str) -> Result<&str, CredentialError> {
    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token),
        _ => Err(CredentialError::MalformedHeader),
    }
}

/// Header first; a present but malformed header fails without consulting
/// the cookie. An empty header counts as absent.
pub fn extract_credential(req: &HttpRequest) -> Result<String, CredentialError> {
    if let Some(token) = from_header(req.headers())? {
        return Ok(token);
    }

    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(CredentialError::Missing)
}

fn from_header(headers: &HeaderMap) -> Result<Option<String>, CredentialError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }
    let value = value.to_str().map_err(|_| CredentialError::MalformedHeader)?;
    parse_bearer(value).map(|token| Some(token.to_string()))
}
