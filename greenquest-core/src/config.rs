use crate::state::{AppState, MintReward, PurchaseTerms};
use serde::{Deserialize, Serialize};

const EMBEDDED_CONFIG: &str = include_str!("../data/config.json");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("starting streak {0} exceeds 100")]
    StreakOutOfRange(u8),
}

/// Progress the demo starts from on every page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingState {
    pub xp: u32,
    pub tokens: u32,
    pub item_count: u32,
    pub streak_percent: u8,
}

impl Default for StartingState {
    fn default() -> Self {
        Self {
            xp: 120,
            tokens: 45,
            item_count: 2,
            streak_percent: 30,
        }
    }
}

impl StartingState {
    #[must_use]
    pub fn to_state(self) -> AppState {
        AppState::new(self.xp, self.tokens, self.item_count, self.streak_percent)
    }
}

/// Tunables for the simulated flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub start: StartingState,
    pub mint: MintReward,
    pub purchase: PurchaseTerms,
    /// Pause between proof upload and the "verified" dialog.
    pub verify_delay_ms: u32,
    pub toast_ttl_ms: u32,
    pub provider_install_url: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            start: StartingState::default(),
            mint: MintReward::default(),
            purchase: PurchaseTerms::default(),
            verify_delay_ms: 250,
            toast_ttl_ms: 3000,
            provider_install_url: "https://metamask.io".to_string(),
        }
    }
}

impl DemoConfig {
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the starting streak is above 100.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        if cfg.start.streak_percent > crate::state::STREAK_MAX {
            return Err(ConfigError::StreakOutOfRange(cfg.start.streak_percent));
        }
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns an error if the embedded JSON fails validation.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_CONFIG)
    }
}
