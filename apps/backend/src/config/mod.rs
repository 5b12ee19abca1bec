//! Process configuration, read once at start-up.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the working directory. Nothing here is mutated after start-up.

mod env;
pub mod http_server;
pub mod jwt;
pub mod logger;

use std::str::FromStr;

pub use env::ConfigError;
use env::Env;
pub use http_server::HttpServerConfig;
pub use jwt::JwtConfig;
pub use logger::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Debug,
    Release,
}

impl FromStr for RuntimeEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(RuntimeEnv::Debug),
            "release" => Ok(RuntimeEnv::Release),
            other => Err(format!("expected debug or release, got {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: RuntimeEnv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub app: AppConfig,
    pub http_server: HttpServerConfig,
    pub jwt: JwtConfig,
    pub logger: LoggerConfig,
}

impl Config {
    /// Load from the process environment after applying a `.env` file, if
    /// one exists. Variables already set in the environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env::new(&lookup);
        Ok(Self {
            app: AppConfig {
                environment: env.parse_or("APP_ENVIRONMENT", RuntimeEnv::Debug)?,
            },
            http_server: HttpServerConfig::load(&env)?,
            jwt: JwtConfig::load(&env)?,
            logger: LoggerConfig::load(&env),
        })
    }
}
