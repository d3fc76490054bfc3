//! Collection tracking: owned cards, wishlist and trade flags, set progress,
//! and JSON / CSV import-export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config;
use crate::error::{DextrendsError, Result};
use crate::models::{
    CardUpdate, CollectionCard, CollectionExport, CollectionStats, Condition, SetProgress,
};

// ---------------------------------------------------------------------------
// CollectionQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionTab {
    #[default]
    All,
    Wishlist,
    Tradelist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionSort {
    Name,
    Set,
    Rarity,
    /// Base order is most valuable first.
    Value,
    /// Base order is newest first.
    #[default]
    DateAdded,
}

/// Filter and sort options for [`CollectionTracker::query`].
///
/// Each sort key has a base order (values and dates descend, text and
/// rarity ascend). `ascending = true` keeps it; the default `false` reverses
/// it, so the default query lists the oldest additions first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    pub tab: CollectionTab,
    pub search: String,
    pub set_id: Option<String>,
    pub sort_by: CollectionSort,
    pub ascending: bool,
}

fn rarity_rank(rarity: &str) -> i64 {
    config::RARITY_ORDER
        .iter()
        .position(|r| *r == rarity)
        .map(|p| p as i64)
        .unwrap_or(-1)
}

/// Base comparison for a sort key; `ascending = false` reverses it.
fn compare_cards(a: &CollectionCard, b: &CollectionCard, sort_by: CollectionSort) -> Ordering {
    match sort_by {
        CollectionSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        CollectionSort::Set => a.set_name.to_lowercase().cmp(&b.set_name.to_lowercase()),
        CollectionSort::Rarity => rarity_rank(&a.rarity).cmp(&rarity_rank(&b.rarity)),
        CollectionSort::Value => b
            .current_price
            .unwrap_or(0.0)
            .total_cmp(&a.current_price.unwrap_or(0.0)),
        CollectionSort::DateAdded => b.date_added.cmp(&a.date_added),
    }
}

/// How an import combines with the cards already tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Discard the current collection.
    #[default]
    Replace,
    /// Keep the current collection and add only cards whose id is new.
    Merge,
}

// ---------------------------------------------------------------------------
// CollectionTracker
// ---------------------------------------------------------------------------

/// In-memory card collection keyed by card id.
#[derive(Debug, Clone, Default)]
pub struct CollectionTracker {
    cards: Vec<CollectionCard>,
}

impl CollectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<CollectionCard>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[CollectionCard] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<CollectionCard> {
        self.cards
    }

    pub fn get(&self, card_id: &str) -> Option<&CollectionCard> {
        self.cards.iter().find(|c| c.card_id == card_id)
    }

    // -- Mutations ---------------------------------------------------------

    /// Add a card. A card already in the collection gains one copy instead;
    /// a new card is stamped with the current time.
    pub fn add(&mut self, card: CollectionCard) {
        if let Some(existing) = self.cards.iter_mut().find(|c| c.card_id == card.card_id) {
            existing.quantity += 1;
        } else {
            tracing::info!(card_id = %card.card_id, "card added to collection");
            self.cards.push(CollectionCard {
                date_added: Utc::now(),
                ..card
            });
        }
    }

    /// Apply a partial update. Returns `false` when the card is not owned.
    pub fn update(&mut self, card_id: &str, update: CardUpdate) -> bool {
        let Some(card) = self.cards.iter_mut().find(|c| c.card_id == card_id) else {
            return false;
        };
        if let Some(q) = update.quantity {
            card.quantity = q;
        }
        if let Some(c) = update.condition {
            card.condition = c;
        }
        if update.purchase_price.is_some() {
            card.purchase_price = update.purchase_price;
        }
        if update.current_price.is_some() {
            card.current_price = update.current_price;
        }
        if update.notes.is_some() {
            card.notes = update.notes;
        }
        if update.is_foil.is_some() {
            card.is_foil = update.is_foil;
        }
        if update.is_first_edition.is_some() {
            card.is_first_edition = update.is_first_edition;
        }
        if update.in_wishlist.is_some() {
            card.in_wishlist = update.in_wishlist;
        }
        if update.in_trade_list.is_some() {
            card.in_trade_list = update.in_trade_list;
        }
        true
    }

    /// Remove a card entirely. Returns `false` when it was not owned.
    pub fn remove(&mut self, card_id: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.card_id != card_id);
        let removed = self.cards.len() != before;
        if removed {
            tracing::info!(card_id, "card removed from collection");
        }
        removed
    }

    pub fn toggle_wishlist(&mut self, card_id: &str) -> bool {
        let flag = self.get(card_id).map(|c| !c.wishlisted());
        flag.is_some_and(|f| {
            self.update(
                card_id,
                CardUpdate {
                    in_wishlist: Some(f),
                    ..Default::default()
                },
            )
        })
    }

    pub fn toggle_trade_list(&mut self, card_id: &str) -> bool {
        let flag = self.get(card_id).map(|c| !c.for_trade());
        flag.is_some_and(|f| {
            self.update(
                card_id,
                CardUpdate {
                    in_trade_list: Some(f),
                    ..Default::default()
                },
            )
        })
    }

    // -- Aggregates --------------------------------------------------------

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            total_cards: self.cards.iter().map(|c| c.quantity).sum(),
            unique_cards: self.cards.len(),
            total_value: self.cards.iter().map(CollectionCard::value).sum(),
            wishlist_count: self.cards.iter().filter(|c| c.wishlisted()).count(),
            trade_list_count: self.cards.iter().filter(|c| c.for_trade()).count(),
        }
    }

    /// Per-set ownership, in order of first appearance.
    ///
    /// `set_sizes` maps set id to the number of cards in the set; sets
    /// without a known size report a total and completion of zero.
    pub fn set_progress(&self, set_sizes: &BTreeMap<String, u32>) -> Vec<SetProgress> {
        let mut progress: Vec<SetProgress> = Vec::new();

        for card in &self.cards {
            let index = match progress.iter().position(|p| p.set_id == card.set_id) {
                Some(i) => i,
                None => {
                    progress.push(SetProgress {
                        set_id: card.set_id.clone(),
                        set_name: card.set_name.clone(),
                        total_cards: set_sizes.get(&card.set_id).copied().unwrap_or(0),
                        owned_cards: 0,
                        completion_percent: 0.0,
                        estimated_value: 0.0,
                    });
                    progress.len() - 1
                }
            };
            let entry = &mut progress[index];
            entry.owned_cards += card.quantity;
            entry.estimated_value += card.value();
        }

        for entry in &mut progress {
            if entry.total_cards > 0 {
                let distinct = self
                    .cards
                    .iter()
                    .filter(|c| c.set_id == entry.set_id)
                    .count() as f64;
                entry.completion_percent =
                    (distinct / entry.total_cards as f64 * 100.0).min(100.0);
            }
        }

        progress
    }

    // -- Queries -----------------------------------------------------------

    pub fn query(&self, q: &CollectionQuery) -> Vec<&CollectionCard> {
        let search = q.search.to_lowercase();
        let mut result: Vec<&CollectionCard> = self
            .cards
            .iter()
            .filter(|c| match q.tab {
                CollectionTab::All => true,
                CollectionTab::Wishlist => c.wishlisted(),
                CollectionTab::Tradelist => c.for_trade(),
            })
            .filter(|c| {
                search.is_empty()
                    || c.name.to_lowercase().contains(&search)
                    || c.set_name.to_lowercase().contains(&search)
                    || c.number.contains(&q.search)
            })
            .filter(|c| q.set_id.as_ref().map_or(true, |s| &c.set_id == s))
            .collect();

        result.sort_by(|a, b| {
            let ord = compare_cards(a, b, q.sort_by);
            if q.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        result
    }

    /// One page (1-based) of query results.
    pub fn page(&self, q: &CollectionQuery, page: usize) -> Vec<&CollectionCard> {
        let start = page.saturating_sub(1) * config::COLLECTION_PAGE_SIZE;
        self.query(q)
            .into_iter()
            .skip(start)
            .take(config::COLLECTION_PAGE_SIZE)
            .collect()
    }

    pub fn total_pages(&self, q: &CollectionQuery) -> usize {
        self.query(q).len().div_ceil(config::COLLECTION_PAGE_SIZE)
    }

    // -- Import / export ---------------------------------------------------

    pub fn export_json(&self) -> Result<String> {
        let export = CollectionExport {
            collection: self.cards.clone(),
            stats: Some(self.stats()),
            exported_at: Some(Utc::now()),
            version: Some(config::STORAGE_VERSION.to_string()),
        };
        tracing::info!(card_count = self.cards.len(), "collection exported");
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Load an exported collection. Returns how many cards were added.
    pub fn import_json(&mut self, json: &str, mode: ImportMode) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(items) = value.get("collection").filter(|c| c.is_array()) else {
            return Err(DextrendsError::InvalidArgument(
                "Import data has no collection array".to_string(),
            ));
        };
        let cards: Vec<CollectionCard> = serde_json::from_value(items.clone())?;
        let added = self.absorb(cards, mode);
        tracing::info!(card_count = added, ?mode, "collection imported");
        Ok(added)
    }

    /// Load cards from CSV, such as the output of [`export_csv`](Self::export_csv).
    ///
    /// Columns are found by header name. Card ID and Card Name are required;
    /// quantity defaults to 1 and condition to Near Mint. Rows missing an id
    /// or name are skipped. Returns how many cards were added.
    pub fn import_csv(&mut self, data: &str, mode: ImportMode) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.iter().all(str::is_empty) {
            return Err(DextrendsError::InvalidArgument(
                "CSV file is empty or has no data rows".to_string(),
            ));
        }
        let columns = CsvColumns::detect(&headers)?;

        let now = Utc::now();
        let mut cards = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            };
            let (Some(card_id), Some(name)) = (field(Some(columns.card_id)), field(Some(columns.name)))
            else {
                continue;
            };

            cards.push(CollectionCard {
                card_id: card_id.to_string(),
                name: name.to_string(),
                set_id: card_id
                    .rsplit_once('-')
                    .map(|(set, _)| set.to_string())
                    .unwrap_or_default(),
                set_name: field(columns.set_name).unwrap_or("Unknown Set").to_string(),
                number: card_id
                    .rsplit_once('-')
                    .map(|(_, n)| n.to_string())
                    .unwrap_or_default(),
                rarity: String::new(),
                image: String::new(),
                types: None,
                quantity: field(columns.quantity)
                    .and_then(|q| q.parse().ok())
                    .filter(|q| *q > 0)
                    .unwrap_or(1),
                condition: field(columns.condition)
                    .and_then(Condition::from_label)
                    .unwrap_or_default(),
                is_first_edition: None,
                is_foil: None,
                purchase_price: field(columns.purchase_price).and_then(|p| p.parse().ok()),
                current_price: None,
                date_added: field(columns.date_added)
                    .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                    .map_or(now, |d| d.with_timezone(&Utc)),
                notes: field(columns.notes).map(str::to_string),
                in_wishlist: None,
                in_trade_list: None,
            });
        }

        if cards.is_empty() {
            return Err(DextrendsError::InvalidArgument(
                "No valid cards found in CSV".to_string(),
            ));
        }
        let added = self.absorb(cards, mode);
        tracing::info!(card_count = added, ?mode, "collection imported from csv");
        Ok(added)
    }

    fn absorb(&mut self, cards: Vec<CollectionCard>, mode: ImportMode) -> usize {
        match mode {
            ImportMode::Replace => {
                self.cards = cards;
                self.cards.len()
            }
            ImportMode::Merge => {
                let before = self.cards.len();
                for card in cards {
                    if self.get(&card.card_id).is_none() {
                        self.cards.push(card);
                    }
                }
                self.cards.len() - before
            }
        }
    }

    /// Render the collection as CSV with a header row.
    pub fn export_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Card ID",
            "Card Name",
            "Set Name",
            "Quantity",
            "Condition",
            "Purchase Price",
            "Notes",
            "Date Added",
        ])?;
        for card in &self.cards {
            writer.write_record([
                card.card_id.clone(),
                card.name.clone(),
                card.set_name.clone(),
                card.quantity.to_string(),
                card.condition.label().to_string(),
                card.purchase_price
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_default(),
                card.notes.clone().unwrap_or_default(),
                card.date_added.to_rfc3339(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| DextrendsError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| DextrendsError::InvalidArgument(e.to_string()))
    }
}

/// Column positions found in a CSV header row.
struct CsvColumns {
    card_id: usize,
    name: usize,
    set_name: Option<usize>,
    quantity: Option<usize>,
    condition: Option<usize>,
    purchase_price: Option<usize>,
    notes: Option<usize>,
    date_added: Option<usize>,
}

impl CsvColumns {
    fn detect(headers: &csv::StringRecord) -> Result<Self> {
        let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let find = |pred: fn(&str) -> bool| lower.iter().position(|h| pred(h.as_str()));

        let card_id = find(|h| h.contains("card") && h.contains("id"));
        let name = find(|h| h.contains("name") && !h.contains("set"));
        let (Some(card_id), Some(name)) = (card_id, name) else {
            return Err(DextrendsError::InvalidArgument(
                "CSV must contain at least Card ID and Card Name columns".to_string(),
            ));
        };

        Ok(Self {
            card_id,
            name,
            set_name: find(|h| h.contains("set")),
            quantity: find(|h| h.contains("quantity") || h.contains("qty")),
            condition: find(|h| h.contains("condition")),
            purchase_price: find(|h| h.contains("price")),
            notes: find(|h| h.contains("note")),
            date_added: find(|h| h.contains("date")),
        })
    }
}
