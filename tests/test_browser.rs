//! Tests for card browsing: filters, trainer subtypes, sorting and pagination.

mod common;

use dextrends_sdk::browser::{filter_options, trainer_subtype, CardBrowser, SortBy, SortOrder};
use dextrends_sdk::models::{CardCategory, PocketCard, TrainerSubtype};

use common::{card, sample_cards};

fn names(cards: &[&PocketCard]) -> Vec<String> {
    cards.iter().map(|c| c.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Trainer subtypes
// ---------------------------------------------------------------------------

#[test]
fn trainer_subtype_heuristics() {
    let cards = sample_cards();
    assert_eq!(
        trainer_subtype(&card(&cards, "pa-007")),
        Some(TrainerSubtype::Supporter)
    );
    assert_eq!(trainer_subtype(&card(&cards, "pa-005")), Some(TrainerSubtype::Item));
    assert_eq!(trainer_subtype(&card(&cards, "pa-001")), Some(TrainerSubtype::Item));
    assert_eq!(
        trainer_subtype(&card(&cards, "a1-225")),
        Some(TrainerSubtype::Supporter)
    );
    assert_eq!(trainer_subtype(&card(&cards, "a2-147")), Some(TrainerSubtype::Tool));
    assert_eq!(trainer_subtype(&card(&cards, "a1-094")), None);
}

#[test]
fn unknown_single_word_trainer_is_supporter() {
    let mut dawn = PocketCard::new("a2-155", "Dawn");
    dawn.type_field = Some("Trainer".to_string());
    assert_eq!(trainer_subtype(&dawn), Some(TrainerSubtype::Supporter));

    let mut gadget = PocketCard::new("a2-999", "Pokémon Communication");
    gadget.type_field = Some("Trainer".to_string());
    assert_eq!(trainer_subtype(&gadget), Some(TrainerSubtype::Item));
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn default_browser_lists_everything_by_name() {
    let cards = sample_cards();
    let browser = CardBrowser::new(&cards);
    let filtered = browser.filtered();
    assert_eq!(filtered.len(), 12);
    assert_eq!(filtered[0].name, "Bulbasaur");
    assert_eq!(filtered[11].name, "Starmie ex");
    assert!(!browser.has_active_filters());
}

#[test]
fn search_is_case_insensitive_substring() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);
    browser.set_search("EX");
    assert_eq!(
        names(&browser.filtered()),
        vec!["Charizard ex", "Mewtwo ex", "Moltres ex", "Pikachu ex", "Starmie ex"]
    );
}

#[test]
fn category_and_subtype_filters() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);
    browser.set_category(CardCategory::Trainer);
    assert_eq!(browser.total_filtered(), 5);

    browser.set_trainer_subtype(TrainerSubtype::Supporter);
    assert_eq!(
        names(&browser.filtered()),
        vec!["Professor's Research", "Sabrina"]
    );

    browser.set_category(CardCategory::Pokemon);
    assert_eq!(browser.filters().trainer_subtype, TrainerSubtype::All);
    assert_eq!(browser.total_filtered(), 7);
}

#[test]
fn type_filter_keeps_trainers() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);
    browser.set_types(&["Fire"]);
    let filtered = browser.filtered();
    assert_eq!(filtered.len(), 7);
    assert!(filtered.iter().all(|c| c.type_lower() == "fire" || c.is_trainer()));

    browser.toggle_type("fire");
    assert_eq!(browser.total_filtered(), 12);
}

#[test]
fn pack_rarity_hp_and_stage_filters() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);

    browser.toggle_pack("Charizard");
    assert_eq!(
        names(&browser.filtered()),
        vec!["Charizard ex", "Moltres ex", "Potion"]
    );

    browser.clear_filters().toggle_rarity("◊");
    assert_eq!(names(&browser.filtered()), vec!["Bulbasaur"]);

    browser.clear_filters().set_hp_range(Some((100, 150)));
    assert_eq!(browser.total_filtered(), 5);

    browser.clear_filters().set_stage(Some("Stage 2"));
    assert_eq!(names(&browser.filtered()), vec!["Charizard ex"]);
}

#[test]
fn active_filter_count_counts_each_value() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);
    browser
        .set_search("a")
        .set_types(&["fire", "water"])
        .set_category(CardCategory::Pokemon);
    assert!(browser.has_active_filters());
    assert_eq!(browser.active_filter_count(), 4);

    browser.clear_filters();
    assert_eq!(browser.active_filter_count(), 0);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn hp_sort_is_highest_first_and_toggles() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);
    browser
        .set_category(CardCategory::Pokemon)
        .set_sort_by(SortBy::Hp);
    assert_eq!(browser.filtered()[0].name, "Charizard ex");

    browser.toggle_sort_order();
    assert_eq!(browser.sort_order(), SortOrder::Desc);
    assert_eq!(browser.filtered()[0].name, "Bulbasaur");
}

#[test]
fn pack_sort_groups_by_pack_name() {
    let cards = sample_cards();
    let mut browser = CardBrowser::new(&cards);
    browser
        .set_category(CardCategory::Pokemon)
        .set_sort_by(SortBy::Pack);
    let packs: Vec<&str> = browser
        .filtered()
        .iter()
        .map(|c| c.pack.as_deref().unwrap_or(""))
        .collect();
    let mut sorted = packs.clone();
    sorted.sort();
    assert_eq!(packs, sorted);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[test]
fn incremental_pagination() {
    let cards = sample_cards();
    let mut browser = CardBrowser::with_page_size(&cards, 5);
    assert_eq!(browser.total_pages(), 3);
    assert_eq!(browser.visible().len(), 5);
    assert!(browser.has_more());

    browser.load_more();
    assert_eq!(browser.visible().len(), 10);
    browser.load_more();
    assert_eq!(browser.visible().len(), 12);
    assert!(!browser.has_more());

    browser.load_more();
    assert_eq!(browser.page(), 3);
}

#[test]
fn load_page_is_clamped() {
    let cards = sample_cards();
    let mut browser = CardBrowser::with_page_size(&cards, 5);
    browser.load_page(10);
    assert_eq!(browser.page(), 3);
    browser.load_page(0);
    assert_eq!(browser.page(), 1);
}

#[test]
fn filter_change_resets_page() {
    let cards = sample_cards();
    let mut browser = CardBrowser::with_page_size(&cards, 5);
    browser.load_more();
    assert_eq!(browser.page(), 2);
    browser.set_search("e");
    assert_eq!(browser.page(), 1);
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

#[test]
fn filter_options_from_pool() {
    let cards = sample_cards();
    let options = filter_options(&cards);
    assert_eq!(
        options.types,
        vec!["fire", "grass", "lightning", "psychic", "water"]
    );
    assert_eq!(
        options.packs,
        vec!["Charizard", "Mewtwo", "Pikachu", "Mythical Island"]
    );
    assert_eq!(options.stages, vec!["Basic", "Stage 1", "Stage 2"]);
    assert_eq!(options.max_hp, 180);
}

#[test]
fn filter_options_for_empty_pool() {
    let options = filter_options(&[]);
    assert!(options.types.is_empty());
    assert_eq!(options.max_hp, 200);
}
