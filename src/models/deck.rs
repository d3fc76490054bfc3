use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config;
use crate::models::PocketCard;

// ---------------------------------------------------------------------------
// DeckFormat — Format rules bounding a deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckFormat {
    #[default]
    Pocket,
    Standard,
}

impl DeckFormat {
    pub fn max_deck_size(self) -> usize {
        match self {
            DeckFormat::Pocket => config::POCKET_DECK_SIZE,
            DeckFormat::Standard => config::STANDARD_DECK_SIZE,
        }
    }

    pub fn max_copies(self) -> u32 {
        match self {
            DeckFormat::Pocket => config::POCKET_MAX_COPIES,
            DeckFormat::Standard => config::STANDARD_MAX_COPIES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeckFormat::Pocket => "pocket",
            DeckFormat::Standard => "standard",
        }
    }
}

// ---------------------------------------------------------------------------
// DeckEntry — A card and its count in a deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEntry {
    pub card: PocketCard,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// DeckStats — Statistics computed from a deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistribution {
    pub pokemon: u32,
    pub trainer: u32,
    pub energy: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total_cards: u32,
    /// Negative only if a deck was loaded that already exceeds the limit.
    pub remaining_slots: i64,
    pub type_distribution: BTreeMap<String, u32>,
    pub category_distribution: CategoryDistribution,
    pub is_empty: bool,
    pub is_full: bool,
}

// ---------------------------------------------------------------------------
// SavedDeck — Persisted deck snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDeck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub format: DeckFormat,
    pub cards: Vec<DeckEntry>,
    pub stats: DeckStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// ImportOutcome — Result of a lenient deck import
// ---------------------------------------------------------------------------

/// Outcome of importing a deck from text, JSON or a share code.
///
/// `errors` may be non-empty even when `success` is true: they list lines
/// or cards that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ImportOutcome {
    pub fn ok(errors: Vec<String>) -> Self {
        Self {
            success: true,
            errors,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            errors: vec![message.to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}
