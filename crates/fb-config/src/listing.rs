//! Listing defaults.

use fb_core::query::{DEFAULT_LIMIT, MAX_LIMIT};
use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

const fn max_limit() -> u32 {
    MAX_LIMIT
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListingConfig {
    /// Page size used when a request omits `limit` or gives an out-of-range one.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Largest page size a request may ask for.
    #[serde(default = "max_limit")]
    pub max_limit: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: max_limit(),
        }
    }
}

impl ListingConfig {
    /// Clamp a requested page size: anything outside `1..=max_limit` falls
    /// back to `default_limit`.
    #[must_use]
    pub const fn normalize_limit(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(limit) if limit >= 1 && limit <= self.max_limit => limit,
            _ => self.default_limit,
        }
    }
}
