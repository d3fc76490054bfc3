use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Condition — Card grading shorthand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    NM,
    LP,
    MP,
    HP,
    D,
}

impl Condition {
    pub fn label(self) -> &'static str {
        match self {
            Condition::NM => "Near Mint",
            Condition::LP => "Lightly Played",
            Condition::MP => "Moderately Played",
            Condition::HP => "Heavily Played",
            Condition::D => "Damaged",
        }
    }

    /// Parse a label or its shorthand (`"Near Mint"`, `"nm"`), ignoring case.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        [Condition::NM, Condition::LP, Condition::MP, Condition::HP, Condition::D]
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s) || format!("{:?}", c).eq_ignore_ascii_case(s))
    }
}

// ---------------------------------------------------------------------------
// CollectionCard — A card owned by the user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCard {
    pub card_id: String,
    pub name: String,
    pub set_id: String,
    pub set_name: String,
    pub number: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub image: String,
    pub types: Option<Vec<String>>,
    pub quantity: u32,
    #[serde(default)]
    pub condition: Condition,
    pub is_first_edition: Option<bool>,
    pub is_foil: Option<bool>,
    pub purchase_price: Option<f64>,
    pub current_price: Option<f64>,
    pub date_added: DateTime<Utc>,
    pub notes: Option<String>,
    pub in_wishlist: Option<bool>,
    pub in_trade_list: Option<bool>,
}

impl CollectionCard {
    /// Market value of all copies (0 when unpriced).
    pub fn value(&self) -> f64 {
        self.current_price.unwrap_or(0.0) * self.quantity as f64
    }

    pub fn wishlisted(&self) -> bool {
        self.in_wishlist.unwrap_or(false)
    }

    pub fn for_trade(&self) -> bool {
        self.in_trade_list.unwrap_or(false)
    }
}

/// Partial update applied by [`CollectionTracker::update`](crate::collection::CollectionTracker::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub quantity: Option<u32>,
    pub condition: Option<Condition>,
    pub purchase_price: Option<f64>,
    pub current_price: Option<f64>,
    pub notes: Option<String>,
    pub is_foil: Option<bool>,
    pub is_first_edition: Option<bool>,
    pub in_wishlist: Option<bool>,
    pub in_trade_list: Option<bool>,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_cards: u32,
    pub unique_cards: usize,
    pub total_value: f64,
    pub wishlist_count: usize,
    pub trade_list_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProgress {
    pub set_id: String,
    pub set_name: String,
    /// Size of the set when known from catalogue data, else 0.
    pub total_cards: u32,
    pub owned_cards: u32,
    pub completion_percent: f64,
    pub estimated_value: f64,
}

/// JSON export envelope; import accepts anything carrying `collection`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionExport {
    pub collection: Vec<CollectionCard>,
    pub stats: Option<CollectionStats>,
    pub exported_at: Option<DateTime<Utc>>,
    pub version: Option<String>,
}
