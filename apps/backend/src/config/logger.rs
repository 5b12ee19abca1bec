use super::env::Env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// A `tracing` filter directive such as `info` or `backend=debug,warn`.
    pub level: String,
}

impl LoggerConfig {
    pub(crate) fn load(env: &Env<'_>) -> Self {
        Self {
            level: env.string_or("LOGGER_LEVEL", "info"),
        }
    }
}
