use thiserror::Error;

use super::claims::{Claims, SubjectId};

/// Why a token could not be issued or verified.
///
/// The token verifier collapses every variant to `Unauthorized`; the variant
/// is only used for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token issuer mismatch")]
    InvalidIssuer,
    #[error("token signed with a disallowed algorithm")]
    DisallowedAlgorithm,
    #[error("token issued in the future")]
    NotYetIssued,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl SignerError {
    /// Short machine-readable reason for security logs.
    pub fn reason(&self) -> &'static str {
        match self {
            SignerError::Expired => "token_expired",
            SignerError::InvalidSignature => "invalid_signature",
            SignerError::InvalidIssuer => "invalid_issuer",
            SignerError::DisallowedAlgorithm => "disallowed_algorithm",
            SignerError::NotYetIssued => "not_yet_issued",
            SignerError::Malformed(_) => "malformed_token",
            SignerError::Encoding(_) => "encoding_failed",
        }
    }
}

/// Issues and verifies access tokens.
///
/// Injected into the pipeline at construction; there is no process-wide
/// default signer.
pub trait Signer: Send + Sync {
    fn sign(&self, subject: SubjectId) -> Result<String, SignerError>;

    fn verify(&self, token: &str) -> Result<Claims, SignerError>;
}
