//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Simulated latency of a login round trip, in milliseconds.
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;

/// Formulary settings. Missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormularyConfig {
    /// Fixed delay applied to every login attempt, matched or not
    pub login_delay_ms: u64,
    /// Load the fixture users, medicines and diseases at startup
    pub seed_fixtures: bool,
}

impl Default for FormularyConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            seed_fixtures: true,
        }
    }
}

impl FormularyConfig {
    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
