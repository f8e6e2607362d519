use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for the engagement streak meter.
pub const STREAK_MAX: u8 = 100;

/// Connected account identifier as returned by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap a provider account string. Surrounding whitespace is dropped and
    /// empty identifiers are rejected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0xABCDEF...1234` becomes `0xABCD...1234`. Short identifiers are kept as-is.
    #[must_use]
    pub fn shortened(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label shown wherever a wallet address would be displayed.
#[must_use]
pub fn wallet_label(wallet: Option<&WalletAddress>) -> String {
    wallet.map_or_else(|| "Not connected".to_string(), WalletAddress::shortened)
}

/// Reward deltas applied when a minted badge is acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintReward {
    pub items: u32,
    pub xp: u32,
    pub tokens: u32,
    pub streak: u8,
}

impl Default for MintReward {
    fn default() -> Self {
        Self {
            items: 1,
            xp: 40,
            tokens: 5,
            streak: 5,
        }
    }
}

/// Token cost and xp bonus of a marketplace purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseTerms {
    pub cost: u32,
    pub xp: u32,
}

impl Default for PurchaseTerms {
    fn default() -> Self {
        Self { cost: 3, xp: 10 }
    }
}

/// Simulated player progress.
///
/// Fields are private so every change goes through the mutation methods
/// below, which keep the numeric bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    wallet: Option<WalletAddress>,
    xp: u32,
    tokens: u32,
    item_count: u32,
    streak_percent: u8,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(120, 45, 2, 30)
    }
}

impl AppState {
    /// Build a disconnected state. `streak_percent` is capped at 100.
    #[must_use]
    pub fn new(xp: u32, tokens: u32, item_count: u32, streak_percent: u8) -> Self {
        Self {
            wallet: None,
            xp,
            tokens,
            item_count,
            streak_percent: streak_percent.min(STREAK_MAX),
        }
    }

    #[must_use]
    pub const fn xp(&self) -> u32 {
        self.xp
    }

    #[must_use]
    pub const fn tokens(&self) -> u32 {
        self.tokens
    }

    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    #[must_use]
    pub const fn streak_percent(&self) -> u8 {
        self.streak_percent
    }

    #[must_use]
    pub const fn wallet(&self) -> Option<&WalletAddress> {
        self.wallet.as_ref()
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn connect_wallet(&mut self, address: WalletAddress) {
        self.wallet = Some(address);
    }

    pub fn disconnect_wallet(&mut self) -> Option<WalletAddress> {
        self.wallet.take()
    }

    pub fn gain_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn gain_tokens(&mut self, amount: u32) {
        self.tokens = self.tokens.saturating_add(amount);
    }

    /// Deduct tokens, stopping at zero. Returns the amount actually spent.
    pub fn spend_tokens(&mut self, amount: u32) -> u32 {
        let spent = amount.min(self.tokens);
        self.tokens -= spent;
        spent
    }

    /// Empty the token balance, returning what was held.
    pub fn drain_tokens(&mut self) -> u32 {
        std::mem::take(&mut self.tokens)
    }

    pub fn add_items(&mut self, count: u32) {
        self.item_count = self.item_count.saturating_add(count);
    }

    pub fn bump_streak(&mut self, points: u8) {
        self.streak_percent = self.streak_percent.saturating_add(points).min(STREAK_MAX);
    }

    pub fn apply_mint(&mut self, reward: &MintReward) {
        self.add_items(reward.items);
        self.gain_xp(reward.xp);
        self.gain_tokens(reward.tokens);
        self.bump_streak(reward.streak);
    }

    pub fn apply_purchase(&mut self, terms: &PurchaseTerms) {
        self.spend_tokens(terms.cost);
        self.gain_xp(terms.xp);
    }

    /// Whether every field is inside its documented range.
    #[must_use]
    pub const fn within_bounds(&self) -> bool {
        self.streak_percent <= STREAK_MAX
    }
}
