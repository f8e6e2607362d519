//! Pure projections of [`AppState`] and [`Catalog`] into view models.
//!
//! Nothing here observes state changes. Whoever mutates the state must call
//! [`Projection::apply`] for each affected [`View`]; projecting the same
//! inputs twice yields equal output.

use crate::catalog::Catalog;
use crate::state::{AppState, wallet_label};

/// Number of static badge placeholders shown beneath the owned items.
pub const BADGE_SLOTS: usize = 6;

/// Caps the xp bar; one percent per 20 xp.
const XP_PER_BAR_PERCENT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Stats,
    Gallery,
    Market,
    Leaderboard,
    Proposals,
    Quests,
    Wallet,
}

impl View {
    pub const ALL: [Self; 7] = [
        Self::Stats,
        Self::Gallery,
        Self::Market,
        Self::Leaderboard,
        Self::Proposals,
        Self::Quests,
        Self::Wallet,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub xp: u32,
    pub tokens: u32,
    pub items: u32,
    /// Streak bar width in percent.
    pub streak_width: u8,
    /// Xp bar width in percent, `min(100, xp / 20)`.
    pub xp_bar_width: f64,
    pub voting_power: String,
}

#[must_use]
pub fn render_stats(state: &AppState) -> StatsView {
    StatsView {
        xp: state.xp(),
        tokens: state.tokens(),
        items: state.item_count(),
        streak_width: state.streak_percent(),
        xp_bar_width: (f64::from(state.xp()) / XP_PER_BAR_PERCENT).min(100.0),
        voting_power: format!("{:.1} GOV", f64::from(state.tokens()) / 10.0),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedTile {
    pub label: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub owned: Vec<OwnedTile>,
    pub badges: Vec<String>,
}

#[must_use]
pub fn render_gallery(state: &AppState) -> GalleryView {
    let owned = (1..=state.item_count())
        .map(|n| OwnedTile {
            label: format!("Badge #{n}"),
            status: "Minted",
        })
        .collect();
    let badges = (1..=BADGE_SLOTS).map(|n| format!("Badge {n}")).collect();
    GalleryView { owned, badges }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketTile {
    pub id: String,
    pub title: String,
    pub price: String,
    pub action_label: &'static str,
}

#[must_use]
pub fn render_market(catalog: &Catalog) -> Vec<MarketTile> {
    catalog
        .market
        .iter()
        .map(|item| MarketTile {
            id: item.id.clone(),
            title: item.title.clone(),
            price: item.price.clone(),
            action_label: item.action_label(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderRow {
    /// 1-based position in catalog order.
    pub rank: usize,
    pub name: String,
    pub xp: u32,
    pub is_player: bool,
}

impl LeaderRow {
    /// `Name — 1640 XP`
    #[must_use]
    pub fn preview_line(&self) -> String {
        format!("{} — {} XP", self.name, self.xp)
    }

    /// `1. Name — 1640 XP`
    #[must_use]
    pub fn ranked_line(&self) -> String {
        format!("{}. {}", self.rank, self.preview_line())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardView {
    pub rows: Vec<LeaderRow>,
}

impl LeaderboardView {
    #[must_use]
    pub fn preview(&self) -> Vec<String> {
        self.rows.iter().map(LeaderRow::preview_line).collect()
    }

    #[must_use]
    pub fn ranked(&self) -> Vec<String> {
        self.rows.iter().map(LeaderRow::ranked_line).collect()
    }
}

/// Catalog rows verbatim. The player's row is flagged for highlighting but
/// keeps its catalog xp.
#[must_use]
pub fn render_leaderboard(catalog: &Catalog) -> LeaderboardView {
    let rows = catalog
        .leaderboard
        .iter()
        .enumerate()
        .map(|(idx, entry)| LeaderRow {
            rank: idx + 1,
            name: entry.name.clone(),
            xp: entry.xp,
            is_player: entry.is_player,
        })
        .collect();
    LeaderboardView { rows }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRow {
    pub id: u32,
    pub title: String,
    pub votes_label: String,
}

#[must_use]
pub fn render_proposals(catalog: &Catalog) -> Vec<ProposalRow> {
    catalog
        .proposals
        .iter()
        .map(|p| ProposalRow {
            id: p.id,
            title: p.title.clone(),
            votes_label: format!("Votes: {}", p.votes),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCard {
    pub id: String,
    pub title: String,
    pub summary: String,
}

#[must_use]
pub fn render_quests(catalog: &Catalog) -> Vec<QuestCard> {
    catalog
        .quests
        .iter()
        .map(|q| QuestCard {
            id: q.id.clone(),
            title: q.title.clone(),
            summary: q.summary.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletView {
    pub address_label: String,
    pub button_label: &'static str,
    pub connected: bool,
}

#[must_use]
pub fn render_wallet(state: &AppState) -> WalletView {
    let connected = state.is_connected();
    WalletView {
        address_label: wallet_label(state.wallet()),
        button_label: if connected {
            "Connected"
        } else {
            "Connect Wallet"
        },
        connected,
    }
}

/// Every view model, bound once and refreshed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub stats: StatsView,
    pub gallery: GalleryView,
    pub market: Vec<MarketTile>,
    pub leaderboard: LeaderboardView,
    pub proposals: Vec<ProposalRow>,
    pub quests: Vec<QuestCard>,
    pub wallet: WalletView,
}

impl Projection {
    #[must_use]
    pub fn project(state: &AppState, catalog: &Catalog) -> Self {
        Self {
            stats: render_stats(state),
            gallery: render_gallery(state),
            market: render_market(catalog),
            leaderboard: render_leaderboard(catalog),
            proposals: render_proposals(catalog),
            quests: render_quests(catalog),
            wallet: render_wallet(state),
        }
    }

    /// Re-project a single view. Other views are left as they were.
    pub fn apply(&mut self, view: View, state: &AppState, catalog: &Catalog) {
        match view {
            View::Stats => self.stats = render_stats(state),
            View::Gallery => self.gallery = render_gallery(state),
            View::Market => self.market = render_market(catalog),
            View::Leaderboard => self.leaderboard = render_leaderboard(catalog),
            View::Proposals => self.proposals = render_proposals(catalog),
            View::Quests => self.quests = render_quests(catalog),
            View::Wallet => self.wallet = render_wallet(state),
        }
    }
}
