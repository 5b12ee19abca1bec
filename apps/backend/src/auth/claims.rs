//! Identity carried by a verified access token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the authenticated user, bound into request extensions by the
/// token verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub i64);

impl SubjectId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Claims included in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    pub iss: String,
    /// Unique token id (UUID v4)
    pub jti: String,
}

impl Claims {
    pub fn subject(&self) -> SubjectId {
        SubjectId(self.user_id)
    }
}
