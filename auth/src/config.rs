use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::jwt::ttl;
use crate::jwt::ttl::DEFAULT_TTL_SECONDS;
use crate::jwt::ttl::MAX_TTL_SECONDS;

/// Authentication configuration.
///
/// Loaded once at startup from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// Access token configuration.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: i64,
    #[serde(default = "max_ttl_seconds")]
    pub max_ttl_seconds: i64,
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

fn default_ttl_seconds() -> i64 {
    DEFAULT_TTL_SECONDS
}

fn max_ttl_seconds() -> i64 {
    MAX_TTL_SECONDS
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("default_ttl_seconds", &self.default_ttl_seconds)
            .field("max_ttl_seconds", &self.max_ttl_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT__SECRET, PASSWORD__MEMORY_KIB, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// * `ConfigError` - A source failed to parse, or the values are unusable
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        Self::from_config(configuration)
    }

    /// Deserialize and check an already-built configuration.
    pub fn from_config(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }

        if self.jwt.default_ttl_seconds <= 0 || self.jwt.max_ttl_seconds <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".to_string(),
            ));
        }

        if !ttl::is_representable(self.jwt.max_ttl_seconds) {
            return Err(ConfigError::Message(
                "jwt.max_ttl_seconds is too large".to_string(),
            ));
        }

        if self.jwt.default_ttl_seconds > self.jwt.max_ttl_seconds {
            return Err(ConfigError::Message(
                "jwt.default_ttl_seconds must not exceed jwt.max_ttl_seconds".to_string(),
            ));
        }

        Ok(())
    }
}
