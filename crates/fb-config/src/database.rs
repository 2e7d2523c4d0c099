//! Record store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "feedback.db".to_string()
}

const fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Local database file. `:memory:` opens a throwaway database.
    #[serde(default = "default_path")]
    pub path: String,

    /// Upper bound on any single store operation.
    #[serde(default = "default_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// SQLite `busy_timeout` applied to every connection.
    #[serde(default = "default_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            operation_timeout_ms: default_timeout_ms(),
            busy_timeout_ms: default_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "feedback.db");
        assert_eq!(config.operation_timeout(), Duration::from_secs(5));
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert!(!config.is_in_memory());
    }
}
