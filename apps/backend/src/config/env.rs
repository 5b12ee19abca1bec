//! Typed reads over a variable lookup (the process environment in
//! production, a map in tests).

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable '{0}' is not set")]
    Missing(&'static str),
    #[error("environment variable '{name}' is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

pub(crate) struct Env<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> Env<'a> {
    pub(crate) fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    /// Unset and blank values are treated the same.
    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub(crate) fn string_or(&self, name: &str, default: &str) -> String {
        self.raw(name).unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.raw(name).ok_or(ConfigError::Missing(name))
    }

    pub(crate) fn parse_or<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.raw(name) {
            None => Ok(default),
            Some(value) => value
                .parse()
                .map_err(|e: T::Err| ConfigError::invalid(name, format!("{value:?}: {e}"))),
        }
    }

    pub(crate) fn positive_or(&self, name: &'static str, default: u64) -> Result<u64, ConfigError> {
        let value = self.parse_or(name, default)?;
        if value == 0 {
            return Err(ConfigError::invalid(name, "must be greater than zero"));
        }
        Ok(value)
    }

    /// Like `positive_or`, also rejecting values above `max`.
    pub(crate) fn bounded_or(
        &self,
        name: &'static str,
        default: u64,
        max: u64,
    ) -> Result<u64, ConfigError> {
        let value = self.positive_or(name, default)?;
        if value > max {
            return Err(ConfigError::invalid(name, format!("must be at most {max}")));
        }
        Ok(value)
    }
}
