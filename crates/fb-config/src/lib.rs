//! # fb-config
//!
//! Layered configuration loading for the feedback tracker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FEEDBACK_*` prefix, `__` as separator)
//! 2. Project-level `.feedback/config.toml`
//! 3. User-level `~/.config/feedback/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `FEEDBACK_SERVER__PORT` -> `server.port`,
//! `FEEDBACK_DATABASE__PATH` -> `database.path`, etc.
//!
//! ```no_run
//! use fb_config::FeedbackConfig;
//!
//! let config = FeedbackConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod database;
mod error;
mod listing;
mod log;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use listing::ListingConfig;
pub use log::LogConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FEEDBACK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl FeedbackConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse, or
    /// `ConfigError::InvalidValue` if the merged result is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading a `.env` file, if one exists.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".feedback/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the server unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be non-zero"));
        }
        if self.server.max_bulk_items == 0 {
            return Err(ConfigError::invalid(
                "server.max_bulk_items",
                "must be at least 1",
            ));
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.database.operation_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "database.operation_timeout_ms",
                "must be non-zero",
            ));
        }
        if self.database.busy_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "database.busy_timeout_ms",
                "must be non-zero",
            ));
        }
        if self.listing.default_limit == 0 {
            return Err(ConfigError::invalid(
                "listing.default_limit",
                "must be at least 1",
            ));
        }
        if self.listing.max_limit > fb_core::query::MAX_LIMIT {
            return Err(ConfigError::invalid(
                "listing.max_limit",
                format!("must be at most {}", fb_core::query::MAX_LIMIT),
            ));
        }
        if self.listing.default_limit > self.listing.max_limit {
            return Err(ConfigError::invalid(
                "listing.default_limit",
                format!(
                    "{} exceeds listing.max_limit ({})",
                    self.listing.default_limit, self.listing.max_limit
                ),
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("feedback").join("config.toml"))
    }

    /// Load `.env` from the current directory or the nearest parent that has one.
    /// Silently does nothing if none is found.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
