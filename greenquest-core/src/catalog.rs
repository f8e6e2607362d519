use serde::{Deserialize, Serialize};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Price label used by items that are minted rather than bought.
pub const MINT_LABEL: &str = "Mint";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {kind} id `{id}` in catalog")]
    DuplicateId { kind: &'static str, id: String },
}

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketItem {
    pub id: String,
    pub title: String,
    /// Either a price such as `0.02 ETH` or the literal `Mint`.
    pub price: String,
}

impl MarketItem {
    #[must_use]
    pub fn is_mint(&self) -> bool {
        self.price == MINT_LABEL
    }

    /// Label of the button attached to this listing.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        if self.is_mint() { "Mint" } else { "Buy" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub xp: u32,
    /// Marks the row that tracks the local player's live xp.
    #[serde(default)]
    pub is_player: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u32,
    pub title: String,
    pub votes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// Static demo data shared by every view. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub market: Vec<MarketItem>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl Catalog {
    /// Parse a catalog and reject duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an id repeats within a list.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    /// The catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON fails validation.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    #[must_use]
    pub fn market_item(&self, id: &str) -> Option<&MarketItem> {
        self.market.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn proposal(&self, id: u32) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    fn check_unique_ids(&self) -> Result<(), CatalogError> {
        fn first_dup<'a>(ids: impl Iterator<Item = &'a str>) -> Option<String> {
            let mut seen = std::collections::HashSet::new();
            ids.into_iter()
                .find(|id| !seen.insert(*id))
                .map(str::to_string)
        }

        if let Some(id) = first_dup(self.market.iter().map(|m| m.id.as_str())) {
            return Err(CatalogError::DuplicateId { kind: "market", id });
        }
        if let Some(id) = first_dup(self.quests.iter().map(|q| q.id.as_str())) {
            return Err(CatalogError::DuplicateId { kind: "quest", id });
        }
        let proposal_ids: Vec<String> = self.proposals.iter().map(|p| p.id.to_string()).collect();
        if let Some(id) = first_dup(proposal_ids.iter().map(String::as_str)) {
            return Err(CatalogError::DuplicateId {
                kind: "proposal",
                id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses_in_order() {
        let catalog = Catalog::embedded().unwrap();
        let ids: Vec<&str> = catalog.market.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["g001", "g002", "g003", "g004"]);
        let names: Vec<&str> = catalog.leaderboard.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Asha", "Miguel", "Zara", "You"]);
        assert!(catalog.leaderboard[3].is_player);
        assert_eq!(catalog.proposals.len(), 2);
        assert!(!catalog.quests.is_empty());
    }

    #[test]
    fn mint_listing_uses_mint_action() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.market_item("g002").unwrap().action_label(), "Mint");
        assert_eq!(catalog.market_item("g001").unwrap().action_label(), "Buy");
        assert!(catalog.market_item("nope").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{"market":[{"id":"a","title":"A","price":"1"},{"id":"a","title":"B","price":"2"}]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "market", .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
