//! Card browsing: filtering, sorting and incremental pagination over a card list.
//!
//! Filter setters return `&mut Self` for chaining and reset pagination to
//! the first page.
//!
//! # Example
//!
//! ```rust
//! use dextrends_sdk::browser::{CardBrowser, SortBy};
//! use dextrends_sdk::models::{CardCategory, PocketCard};
//!
//! let cards = vec![PocketCard::new("a1-001", "Bulbasaur")];
//! let mut browser = CardBrowser::new(&cards);
//! browser
//!     .set_search("bulb")
//!     .set_category(CardCategory::Pokemon)
//!     .set_sort_by(SortBy::Name);
//! assert_eq!(browser.filtered().len(), 1);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::config;
use crate::models::{CardCategory, PocketCard, TrainerSubtype};

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Type,
    /// Highest HP first in ascending order.
    Hp,
    Rarity,
    Pack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or("");
    let b = b.unwrap_or("");
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_cards(a: &PocketCard, b: &PocketCard, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => compare_text(Some(&a.name), Some(&b.name)),
        SortBy::Type => compare_text(a.type_field.as_deref(), b.type_field.as_deref()),
        SortBy::Hp => b.hp_value().cmp(&a.hp_value()),
        SortBy::Rarity => compare_text(a.rarity.as_deref(), b.rarity.as_deref()),
        SortBy::Pack => compare_text(a.pack.as_deref(), b.pack.as_deref()),
    }
}

// ---------------------------------------------------------------------------
// Trainer subtypes
// ---------------------------------------------------------------------------

struct SubtypePatterns {
    tool: Vec<Regex>,
    supporter: Vec<Regex>,
    item: Vec<Regex>,
    proper_noun: Regex,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("trainer pattern is valid"))
        .collect()
}

fn subtype_patterns() -> &'static SubtypePatterns {
    static PATTERNS: OnceLock<SubtypePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SubtypePatterns {
        tool: compile(&[
            r"tool$", r"^rocky helmet", r"^muscle band", r"^leftovers", r"^float stone",
            r"berry$", r"cape$", r"band$", r"barb$", r"cord$", r"stone$", r"^lucky",
            r"^amulet", r"^charm", r"^crystal", r"^scope", r"^specs", r"^goggles",
        ]),
        supporter: compile(&[
            r"^professor", r"^dr\.", r"^mr\.", r"^ms\.", r"^mrs\.", r"^captain",
            r"research$", r"analysis$", r"theory$",
            r"(?i)^(erika|misty|blaine|koga|giovanni|brock|sabrina|bill|oak|red)$",
            r"(?i)^(cynthia|lance|steven|wallace|diantha|iris|alder)$",
            r"(?i)^(lillie|mars|cyrus|copycat|pokemon centre lady|red card)$",
        ]),
        item: compile(&[
            r"potion$", r"^potion$", r"^super potion", r"^hyper potion", r"^max potion",
            r"ball$", r"^poke ball", r"^great ball", r"^ultra ball", r"^x ", r"^switch",
            r"^rope", r"candy$",
        ]),
        proper_noun: Regex::new(r"^[A-Z][a-z]+$").expect("proper noun pattern is valid"),
    })
}

/// Classify a trainer card as tool, supporter or item from its name.
///
/// Returns `None` for non-trainer cards. Unrecognised single capitalised
/// words are treated as character names (supporters); anything else
/// defaults to item.
pub fn trainer_subtype(card: &PocketCard) -> Option<TrainerSubtype> {
    if !card.is_trainer() {
        return None;
    }
    let name = card.name.to_lowercase();
    let patterns = subtype_patterns();

    if patterns.tool.iter().any(|p| p.is_match(&name)) {
        return Some(TrainerSubtype::Tool);
    }
    if patterns.supporter.iter().any(|p| p.is_match(&name)) {
        return Some(TrainerSubtype::Supporter);
    }
    if patterns.item.iter().any(|p| p.is_match(&name)) {
        return Some(TrainerSubtype::Item);
    }

    let words: Vec<&str> = card.name.split(' ').collect();
    if words.len() == 1 && patterns.proper_noun.is_match(words[0]) {
        return Some(TrainerSubtype::Supporter);
    }
    Some(TrainerSubtype::Item)
}

// ---------------------------------------------------------------------------
// CardFilters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFilters {
    pub search: String,
    /// Lowercased Pokémon types; trainers and energy are never excluded by it.
    pub types: Vec<String>,
    pub category: CardCategory,
    pub trainer_subtype: TrainerSubtype,
    pub packs: Vec<String>,
    pub rarities: Vec<String>,
    /// Inclusive HP bounds.
    pub hp_range: Option<(u32, u32)>,
    pub stage: Option<String>,
}

impl CardFilters {
    pub fn matches(&self, card: &PocketCard) -> bool {
        if !self.search.is_empty()
            && !card.name.to_lowercase().contains(&self.search.to_lowercase())
        {
            return false;
        }

        let card_type = card.type_lower();
        let is_trainer = card_type == "trainer";
        let is_energy = card_type == "energy";

        match self.category {
            CardCategory::All => {}
            CardCategory::Pokemon if is_trainer || is_energy => return false,
            CardCategory::Trainer if !is_trainer => return false,
            CardCategory::Energy if !is_energy => return false,
            _ => {}
        }

        if self.trainer_subtype != TrainerSubtype::All && is_trainer {
            if trainer_subtype(card) != Some(self.trainer_subtype) {
                return false;
            }
        }

        if !self.types.is_empty() && !is_trainer && !is_energy && !self.types.contains(&card_type)
        {
            return false;
        }

        if !self.packs.is_empty() && !card.pack.as_ref().is_some_and(|p| self.packs.contains(p)) {
            return false;
        }

        if !self.rarities.is_empty()
            && !card.rarity.as_ref().is_some_and(|r| self.rarities.contains(r))
        {
            return false;
        }

        if let Some((min, max)) = self.hp_range {
            let hp = card.hp_value();
            if hp < min || hp > max {
                return false;
            }
        }

        if let Some(stage) = &self.stage {
            if card.stage.as_ref() != Some(stage) {
                return false;
            }
        }

        true
    }

    pub fn is_active(&self) -> bool {
        *self != CardFilters::default()
    }

    /// Number of active filter values; each selected type, pack and rarity counts.
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.search.is_empty() {
            count += 1;
        }
        count += self.types.len();
        if self.category != CardCategory::All {
            count += 1;
        }
        if self.trainer_subtype != TrainerSubtype::All {
            count += 1;
        }
        count += self.packs.len();
        count += self.rarities.len();
        if self.hp_range.is_some() {
            count += 1;
        }
        if self.stage.is_some() {
            count += 1;
        }
        count
    }
}

fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

// ---------------------------------------------------------------------------
// FilterOptions
// ---------------------------------------------------------------------------

/// Distinct filter values present in a card list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub types: Vec<String>,
    /// Ordered by release, see [`config::ALL_PACKS`].
    pub packs: Vec<String>,
    pub rarities: Vec<String>,
    pub stages: Vec<String>,
    pub max_hp: u32,
}

pub fn filter_options(cards: &[PocketCard]) -> FilterOptions {
    if cards.is_empty() {
        return FilterOptions {
            types: Vec::new(),
            packs: Vec::new(),
            rarities: Vec::new(),
            stages: Vec::new(),
            max_hp: 200,
        };
    }

    let mut types = BTreeSet::new();
    let mut packs = BTreeSet::new();
    let mut rarities = BTreeSet::new();
    let mut stages = BTreeSet::new();
    let mut max_hp = 0;

    for card in cards {
        let t = card.type_lower();
        if !t.is_empty() && t != "trainer" {
            types.insert(t);
        }
        if let Some(p) = &card.pack {
            packs.insert(p.as_str());
        }
        if let Some(r) = &card.rarity {
            rarities.insert(r.clone());
        }
        if let Some(s) = &card.stage {
            stages.insert(s.clone());
        }
        max_hp = max_hp.max(card.hp_value());
    }

    FilterOptions {
        types: types.into_iter().collect(),
        packs: config::ALL_PACKS
            .iter()
            .filter(|p| packs.contains(**p))
            .map(|p| p.to_string())
            .collect(),
        rarities: rarities.into_iter().collect(),
        stages: stages.into_iter().collect(),
        max_hp,
    }
}

// ---------------------------------------------------------------------------
// CardBrowser
// ---------------------------------------------------------------------------

/// Filter, sort and page through a borrowed card list.
pub struct CardBrowser<'a> {
    cards: &'a [PocketCard],
    filters: CardFilters,
    sort_by: SortBy,
    sort_order: SortOrder,
    page: usize,
    page_size: usize,
}

impl<'a> CardBrowser<'a> {
    pub fn new(cards: &'a [PocketCard]) -> Self {
        Self::with_page_size(cards, config::BROWSER_PAGE_SIZE)
    }

    pub fn with_page_size(cards: &'a [PocketCard], page_size: usize) -> Self {
        Self {
            cards,
            filters: CardFilters::default(),
            sort_by: SortBy::Name,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    // -- Results -----------------------------------------------------------

    /// All cards passing the filters, sorted.
    pub fn filtered(&self) -> Vec<&'a PocketCard> {
        let mut result: Vec<&'a PocketCard> =
            self.cards.iter().filter(|c| self.filters.matches(c)).collect();
        let sort_by = self.sort_by;
        let descending = self.sort_order == SortOrder::Desc;
        result.sort_by(|a, b| {
            let ord = compare_cards(a, b, sort_by);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        result
    }

    /// The first `page * page_size` filtered cards.
    pub fn visible(&self) -> Vec<&'a PocketCard> {
        let mut filtered = self.filtered();
        filtered.truncate(self.page * self.page_size);
        filtered
    }

    pub fn total_filtered(&self) -> usize {
        self.filtered().len()
    }

    pub fn total_pages(&self) -> usize {
        self.total_filtered().div_ceil(self.page_size)
    }

    pub fn has_more(&self) -> bool {
        self.page * self.page_size < self.total_filtered()
    }

    pub fn filter_options(&self) -> FilterOptions {
        filter_options(self.cards)
    }

    // -- Pagination --------------------------------------------------------

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn load_more(&mut self) {
        if self.has_more() {
            self.page += 1;
        }
    }

    /// Jump to a page, clamped to `1..=total_pages`.
    pub fn load_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages()).max(1);
    }

    pub fn reset_pagination(&mut self) {
        self.page = 1;
    }

    // -- Filters -----------------------------------------------------------

    pub fn filters(&self) -> &CardFilters {
        &self.filters
    }

    pub fn set_search(&mut self, search: &str) -> &mut Self {
        self.filters.search = search.to_string();
        self.touched()
    }

    pub fn set_types(&mut self, types: &[&str]) -> &mut Self {
        self.filters.types = types.iter().map(|t| t.to_lowercase()).collect();
        self.touched()
    }

    pub fn toggle_type(&mut self, t: &str) -> &mut Self {
        toggle(&mut self.filters.types, &t.to_lowercase());
        self.touched()
    }

    /// Changing the category also resets the trainer subtype.
    pub fn set_category(&mut self, category: CardCategory) -> &mut Self {
        self.filters.category = category;
        self.filters.trainer_subtype = TrainerSubtype::All;
        self.touched()
    }

    pub fn set_trainer_subtype(&mut self, subtype: TrainerSubtype) -> &mut Self {
        self.filters.trainer_subtype = subtype;
        self.touched()
    }

    pub fn set_packs(&mut self, packs: &[&str]) -> &mut Self {
        self.filters.packs = packs.iter().map(|p| p.to_string()).collect();
        self.touched()
    }

    pub fn toggle_pack(&mut self, pack: &str) -> &mut Self {
        toggle(&mut self.filters.packs, pack);
        self.touched()
    }

    pub fn set_rarities(&mut self, rarities: &[&str]) -> &mut Self {
        self.filters.rarities = rarities.iter().map(|r| r.to_string()).collect();
        self.touched()
    }

    pub fn toggle_rarity(&mut self, rarity: &str) -> &mut Self {
        toggle(&mut self.filters.rarities, rarity);
        self.touched()
    }

    pub fn set_hp_range(&mut self, range: Option<(u32, u32)>) -> &mut Self {
        self.filters.hp_range = range;
        self.touched()
    }

    pub fn set_stage(&mut self, stage: Option<&str>) -> &mut Self {
        self.filters.stage = stage.map(str::to_string);
        self.touched()
    }

    pub fn clear_filters(&mut self) -> &mut Self {
        self.filters = CardFilters::default();
        self.touched()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    // -- Sorting -----------------------------------------------------------

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) -> &mut Self {
        self.sort_by = sort_by;
        self
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> &mut Self {
        self.sort_order = order;
        self
    }

    pub fn toggle_sort_order(&mut self) -> &mut Self {
        self.sort_order = match self.sort_order {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        };
        self
    }

    fn touched(&mut self) -> &mut Self {
        self.page = 1;
        self
    }
}
