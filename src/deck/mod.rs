//! Deck building under format rules.
//!
//! A [`DeckBuilder`] owns the working deck: an ordered list of
//! [`DeckEntry`] values bounded by a maximum deck size and a per-name copy
//! limit. Text, JSON and share-code import/export live in the submodules.

pub mod share;
pub mod text;
pub mod validation;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{
    CategoryDistribution, DeckEntry, DeckFormat, DeckStats, ImportOutcome, PocketCard,
    ValidationResult,
};

pub use share::SharePayload;
pub use text::{parse_deck_line, ParsedLine};

const DEFAULT_DECK_NAME: &str = "My Pocket Deck";

// ---------------------------------------------------------------------------
// DeckConfig
// ---------------------------------------------------------------------------

/// Size and copy limits applied by a [`DeckBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckConfig {
    pub max_deck_size: usize,
    pub max_copies_per_card: u32,
}

impl DeckConfig {
    pub fn for_format(format: DeckFormat) -> Self {
        Self {
            max_deck_size: format.max_deck_size(),
            max_copies_per_card: format.max_copies(),
        }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::for_format(DeckFormat::Pocket)
    }
}

// ---------------------------------------------------------------------------
// Base names
// ---------------------------------------------------------------------------

fn art_variant_suffixes() -> &'static [Regex] {
    static SUFFIXES: OnceLock<Vec<Regex>> = OnceLock::new();
    SUFFIXES.get_or_init(|| {
        [
            r"(?i)\s*\(Full Art\)",
            r"(?i)\s*\(Illustration Rare\)",
            r"(?i)\s*\(Special Art Rare\)",
            r"(?i)\s*\(SAR\)",
            r"(?i)\s*\(FA\)",
            r"(?i)\s*\(IR\)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("art variant pattern is valid"))
        .collect()
    })
}

/// Name used for copy-limit checks.
///
/// Trainer art variants ("Professor's Research (Full Art)") collapse onto
/// the plain name. Pokémon names are kept as-is, so "Pikachu ex" and
/// "Pikachu" are counted separately.
pub fn base_name(card: &PocketCard) -> String {
    let name = card.name.trim();
    if !card.is_trainer_like() {
        return name.to_string();
    }
    let mut stripped = name.to_string();
    for re in art_variant_suffixes() {
        stripped = re.replacen(&stripped, 1, "").into_owned();
    }
    stripped.trim().to_string()
}

// ---------------------------------------------------------------------------
// DeckBuilder
// ---------------------------------------------------------------------------

/// Working deck state.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    entries: Vec<DeckEntry>,
    name: String,
    format: DeckFormat,
    config: DeckConfig,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new(DeckFormat::Pocket)
    }
}

impl DeckBuilder {
    /// Create an empty deck using the format's size and copy limits.
    pub fn new(format: DeckFormat) -> Self {
        Self::with_config(format, DeckConfig::for_format(format))
    }

    /// Create an empty deck with custom limits.
    pub fn with_config(format: DeckFormat, config: DeckConfig) -> Self {
        Self {
            entries: Vec::new(),
            name: DEFAULT_DECK_NAME.to_string(),
            format,
            config,
        }
    }

    /// Seed the builder with an existing deck, e.g. one loaded from storage.
    pub fn from_entries(
        format: DeckFormat,
        config: DeckConfig,
        name: &str,
        entries: Vec<DeckEntry>,
    ) -> Self {
        Self {
            entries,
            name: name.to_string(),
            format,
            config,
        }
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn format(&self) -> DeckFormat {
        self.format
    }

    pub fn config(&self) -> DeckConfig {
        self.config
    }

    pub fn total_cards(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    // -- Card operations ---------------------------------------------------

    /// Add one copy of a card.
    ///
    /// Returns `false` (and leaves the deck unchanged) when the deck is full
    /// or the card's base name is already at the copy limit.
    pub fn add_card(&mut self, card: &PocketCard) -> bool {
        if self.total_cards() as usize >= self.config.max_deck_size {
            return false;
        }
        if self.base_name_count(card) >= self.config.max_copies_per_card {
            return false;
        }

        match self.entries.iter_mut().find(|e| e.card.id == card.id) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(DeckEntry {
                card: card.clone(),
                count: 1,
            }),
        }
        true
    }

    /// Remove one copy of a card; the entry disappears at zero.
    pub fn remove_card(&mut self, card_id: &str) {
        let Some(index) = self.entries.iter().position(|e| e.card.id == card_id) else {
            return;
        };
        if self.entries[index].count > 1 {
            self.entries[index].count -= 1;
        } else {
            self.entries.remove(index);
        }
    }

    /// Set the exact count of a card already in the deck.
    ///
    /// Counts above the copy limit are ignored; zero removes the entry.
    /// Cards not in the deck are not added.
    pub fn set_card_count(&mut self, card_id: &str, count: u32) {
        if count > self.config.max_copies_per_card {
            return;
        }
        let Some(index) = self.entries.iter().position(|e| e.card.id == card_id) else {
            return;
        };
        if count == 0 {
            self.entries.remove(index);
        } else {
            self.entries[index].count = count;
        }
    }

    /// Copies of this exact card id in the deck.
    pub fn card_count(&self, card_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.card.id == card_id)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Copies of every card sharing this card's base name.
    pub fn base_name_count(&self, card: &PocketCard) -> u32 {
        let base = base_name(card);
        self.entries
            .iter()
            .filter(|e| base_name(&e.card) == base)
            .map(|e| e.count)
            .sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // -- Derived data ------------------------------------------------------

    pub fn stats(&self) -> DeckStats {
        let total = self.total_cards();
        let mut type_distribution: BTreeMap<String, u32> = BTreeMap::new();
        let mut categories = CategoryDistribution::default();

        for entry in &self.entries {
            let t = entry.card.type_lower();
            let t = if t.is_empty() { "unknown".to_string() } else { t };

            match t.as_str() {
                "trainer" | "item" | "supporter" | "tool" => categories.trainer += entry.count,
                "energy" => categories.energy += entry.count,
                _ => categories.pokemon += entry.count,
            }
            *type_distribution.entry(t).or_default() += entry.count;
        }

        DeckStats {
            total_cards: total,
            remaining_slots: self.config.max_deck_size as i64 - total as i64,
            type_distribution,
            category_distribution: categories,
            is_empty: total == 0,
            is_full: total as usize >= self.config.max_deck_size,
        }
    }

    /// Check the deck against its format rules.
    pub fn validate(&self) -> ValidationResult {
        validation::validate(&self.entries, &self.config)
    }

    // -- Import helpers ----------------------------------------------------

    /// Replace the deck with `parsed`, truncating to the deck size limit.
    pub(crate) fn replace_fitted(&mut self, parsed: Vec<DeckEntry>) {
        let mut total = 0usize;
        let mut fitted = Vec::new();
        for mut entry in parsed {
            if total >= self.config.max_deck_size {
                break;
            }
            let room = (self.config.max_deck_size - total) as u32;
            entry.count = entry.count.min(room);
            if entry.count > 0 {
                total += entry.count as usize;
                fitted.push(entry);
            }
        }
        self.entries = fitted;
    }

    /// Merge `count` copies of `card` into a pending import list, clamped to
    /// the copy limit.
    pub(crate) fn merge_parsed(&self, parsed: &mut Vec<DeckEntry>, card: &PocketCard, count: u32) {
        let max = self.config.max_copies_per_card;
        match parsed.iter_mut().find(|e| e.card.id == card.id) {
            Some(existing) => existing.count = existing.count.saturating_add(count).min(max),
            None => parsed.push(DeckEntry {
                card: card.clone(),
                count: count.min(max),
            }),
        }
    }

    /// Apply a parsed import, or fail when nothing matched.
    pub(crate) fn finish_import(
        &mut self,
        parsed: Vec<DeckEntry>,
        errors: Vec<String>,
        empty_message: &str,
    ) -> ImportOutcome {
        if parsed.is_empty() {
            return ImportOutcome::failed(empty_message);
        }
        self.replace_fitted(parsed);
        tracing::debug!(deck = %self.name, cards = self.total_cards(), "deck imported");
        ImportOutcome::ok(errors)
    }
}
