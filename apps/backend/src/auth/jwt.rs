use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::claims::{Claims, SubjectId};
use super::signer::{Signer, SignerError};
use crate::config::jwt::JwtConfig;
use crate::config::ConfigError;

const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// HMAC-signed JWT access tokens.
pub struct JwtSigner {
    issuer: String,
    algorithms: Vec<Algorithm>,
    token_duration: Duration,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtSigner {
    /// Tokens are signed with the first algorithm in `algorithms`; all of
    /// them are accepted on verification. Only the HMAC family is supported.
    pub fn new(
        issuer: impl Into<String>,
        secret: &[u8],
        algorithms: Vec<Algorithm>,
        token_duration: Duration,
    ) -> Result<Self, SignerError> {
        if algorithms.is_empty() || algorithms.iter().any(|alg| !HMAC_FAMILY.contains(alg)) {
            return Err(SignerError::DisallowedAlgorithm);
        }
        Ok(Self {
            issuer: issuer.into(),
            algorithms,
            token_duration,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        let algorithms = config.algorithms()?;
        Self::new(
            config.issuer.clone(),
            config.secret_key.as_bytes(),
            algorithms,
            config.token_duration(),
        )
        .map_err(|_| ConfigError::invalid("JWT_ALLOWED_ALGS", "only HS256, HS384 and HS512 are supported"))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Mint a token as if the current time were `now`.
    pub fn sign_at(&self, subject: SubjectId, now: SystemTime) -> Result<String, SignerError> {
        let iat = unix_seconds(now)?;
        let ttl = i64::try_from(self.token_duration.as_secs())
            .map_err(|_| SignerError::Encoding("token duration out of range".to_string()))?;

        let claims = Claims {
            user_id: subject.get(),
            iat,
            exp: iat
                .checked_add(ttl)
                .ok_or_else(|| SignerError::Encoding("token expiry out of range".to_string()))?,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(self.algorithms[0]), &claims, &self.encoding)
            .map_err(|e| SignerError::Encoding(e.to_string()))
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Expiry and issued-at are checked here with zero leeway; the library
    /// checks signature, algorithm and issuer.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<Claims, SignerError> {
        let mut validation = Validation::new(self.algorithms[0]);
        validation.algorithms = self.algorithms.clone();
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SignerError::Expired,
                ErrorKind::ImmatureSignature => SignerError::NotYetIssued,
                ErrorKind::InvalidSignature => SignerError::InvalidSignature,
                ErrorKind::InvalidIssuer => SignerError::InvalidIssuer,
                ErrorKind::InvalidAlgorithm => SignerError::DisallowedAlgorithm,
                _ => SignerError::Malformed(e.to_string()),
            })?;

        let now = unix_seconds(now)?;
        if now >= claims.exp {
            return Err(SignerError::Expired);
        }
        if now < claims.iat {
            return Err(SignerError::NotYetIssued);
        }
        Ok(claims)
    }
}

impl Signer for JwtSigner {
    fn sign(&self, subject: SubjectId) -> Result<String, SignerError> {
        self.sign_at(subject, SystemTime::now())
    }

    fn verify(&self, token: &str) -> Result<Claims, SignerError> {
        self.verify_at(token, SystemTime::now())
    }
}

fn unix_seconds(at: SystemTime) -> Result<i64, SignerError> {
    let secs = at
        .duration_since(UNIX_EPOCH)
        .map_err(|_| SignerError::Encoding("clock before unix epoch".to_string()))?
        .as_secs();
    i64::try_from(secs).map_err(|_| SignerError::Encoding("clock out of range".to_string()))
}
