//! Credential extraction and token signing/verification.

pub mod claims;
pub mod credential;
pub mod jwt;
pub mod signer;

pub use claims::{Claims, SubjectId};
pub use jwt::JwtSigner;
pub use signer::{Signer, SignerError};
