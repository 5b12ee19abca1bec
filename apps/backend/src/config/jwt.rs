use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::env::{ConfigError, Env};

/// One year, in minutes.
pub const MAX_TOKEN_DURATION_MINUTES: u64 = 365 * 24 * 60;

#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    /// Comma-separated algorithm names, e.g. `HS256,HS512`.
    pub allowed_algs: String,
    pub issuer: String,
    pub secret_key: String,
    /// Token lifetime in minutes.
    pub token_duration: u64,
}

impl JwtConfig {
    pub(crate) fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let config = Self {
            allowed_algs: env.string_or("JWT_ALLOWED_ALGS", "HS256"),
            issuer: env.required("JWT_ISSUER")?,
            secret_key: env.required("JWT_SECRET_KEY")?,
            token_duration: env.bounded_or(
                "JWT_TOKEN_DURATION",
                60,
                MAX_TOKEN_DURATION_MINUTES,
            )?,
        };
        config.algorithms()?;
        Ok(config)
    }

    /// The allowed algorithms in configured order. The first one signs.
    pub fn algorithms(&self) -> Result<Vec<Algorithm>, ConfigError> {
        let algorithms = self
            .allowed_algs
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                Algorithm::from_str(name).map_err(|_| {
                    ConfigError::invalid("JWT_ALLOWED_ALGS", format!("unknown algorithm {name:?}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if algorithms.is_empty() {
            return Err(ConfigError::invalid("JWT_ALLOWED_ALGS", "no algorithm configured"));
        }
        Ok(algorithms)
    }

    pub fn token_duration(&self) -> Duration {
        Duration::from_secs(self.token_duration.saturating_mul(60))
    }
}

// Keeps the secret out of debug output and logs.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("allowed_algs", &self.allowed_algs)
            .field("issuer", &self.issuer)
            .field("secret_key", &"[REDACTED]")
            .field("token_duration", &self.token_duration)
            .finish()
    }
}
