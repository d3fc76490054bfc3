//! Tests for the persistence views exposed by the SDK.

mod common;

use std::time::Duration;

use dextrends_sdk::alerts::PriceAlertBook;
use dextrends_sdk::models::{
    AlertSettings, AlertType, CheckFrequency, DeckFormat, NewAlert, Theme,
};
use dextrends_sdk::stores::PreferenceStore;
use dextrends_sdk::type_chart::PokemonType::*;
use dextrends_sdk::{CollectionTracker, DeckBuilder, DextrendsSdk, TeamBuilder};

use common::{card, collection_card, member, sample_cards, temp_sdk, temp_store};

// ---------------------------------------------------------------------------
// DeckLibrary
// ---------------------------------------------------------------------------

#[test]
fn empty_deck_is_not_saved() {
    let (sdk, _tmp) = temp_sdk();
    assert!(sdk.decks().save(&DeckBuilder::default()).unwrap().is_none());
    assert!(sdk.decks().list().unwrap().is_empty());
}

#[test]
fn save_list_load_delete_deck() {
    let (sdk, _tmp) = temp_sdk();
    let cards = sample_cards();
    let mut deck = DeckBuilder::new(DeckFormat::Standard);
    deck.set_name("  Fire Box  ");
    deck.add_card(&card(&cards, "a1-036"));
    deck.add_card(&card(&cards, "a1-047"));

    let saved = sdk.decks().save(&deck).unwrap().unwrap();
    assert!(saved.id.starts_with("deck_"));
    assert_eq!(saved.name, "Fire Box");
    assert_eq!(saved.stats.total_cards, 2);

    let listed = sdk.decks().list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], saved);

    let loaded = sdk.decks().load(&saved.id).unwrap().unwrap();
    assert_eq!(loaded.name(), "Fire Box");
    assert_eq!(loaded.format(), DeckFormat::Standard);
    assert_eq!(loaded.config().max_copies_per_card, 4);
    assert_eq!(loaded.entries(), deck.entries());

    assert!(sdk.decks().delete(&saved.id).unwrap());
    assert!(!sdk.decks().delete(&saved.id).unwrap());
    assert!(sdk.decks().load(&saved.id).unwrap().is_none());
}

#[test]
fn blank_deck_name_becomes_unnamed() {
    let (sdk, _tmp) = temp_sdk();
    let cards = sample_cards();
    let mut deck = DeckBuilder::default();
    deck.set_name("   ");
    deck.add_card(&card(&cards, "a1-001"));
    let saved = sdk.decks().save(&deck).unwrap().unwrap();
    assert_eq!(saved.name, "Unnamed Deck");
}

#[test]
fn saves_append_in_order() {
    let (sdk, _tmp) = temp_sdk();
    let cards = sample_cards();
    let mut deck = DeckBuilder::default();
    deck.add_card(&card(&cards, "a1-001"));
    let first = sdk.decks().save(&deck).unwrap().unwrap();
    let second = sdk.decks().save(&deck).unwrap().unwrap();
    assert_ne!(first.id, second.id);

    let ids: Vec<String> = sdk.decks().list().unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

// ---------------------------------------------------------------------------
// CollectionStore / AlertStore
// ---------------------------------------------------------------------------

#[test]
fn collection_persists() {
    let (sdk, _tmp) = temp_sdk();
    assert!(sdk.collection().load().unwrap().cards().is_empty());

    let mut tracker = CollectionTracker::new();
    tracker.add(collection_card("base1-4", "Charizard", "base1", Some(350.0)));
    sdk.collection().save(&tracker).unwrap();

    let loaded = sdk.collection().load().unwrap();
    assert_eq!(loaded.cards(), tracker.cards());
}

#[test]
fn alerts_and_settings_persist() {
    let (sdk, _tmp) = temp_sdk();
    assert_eq!(sdk.alerts().settings().unwrap(), AlertSettings::default());

    let mut book = PriceAlertBook::new();
    let id = book.create(NewAlert {
        card_id: "base1-4".to_string(),
        card_name: "Charizard".to_string(),
        card_image: String::new(),
        card_set: "Base Set".to_string(),
        card_number: "4".to_string(),
        current_price: 300.0,
        alert_type: AlertType::PercentDrop,
        target_value: 15.0,
    });
    sdk.alerts().save(&book).unwrap();
    assert_eq!(sdk.alerts().load().unwrap().get(&id), book.get(&id));

    let settings = AlertSettings {
        check_frequency: CheckFrequency::Hourly,
        email_notifications: true,
        email_address: Some("trainer@example.com".to_string()),
        ..Default::default()
    };
    sdk.alerts().save_settings(&settings).unwrap();
    assert_eq!(sdk.alerts().settings().unwrap(), settings);
}

#[test]
fn cache_writes_never_evict_saved_collection() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = DextrendsSdk::builder()
        .storage_dir(tmp.path())
        .quota_bytes(4000)
        .offline(true)
        .build()
        .unwrap();

    let mut tracker = CollectionTracker::new();
    tracker.add(collection_card("base1-4", "Charizard", "base1", Some(350.0)));
    sdk.collection().save(&tracker).unwrap();

    let filler = "x".repeat(500);
    for i in 0..20 {
        sdk.store()
            .set(&format!("pokeapi-pokemon-{i}"), &filler, Duration::from_secs(3600))
            .unwrap();
    }

    assert_eq!(sdk.collection().load().unwrap().cards(), tracker.cards());
    assert!(sdk.store().contains("pokeapi-pokemon-19"));
    assert!(!sdk.store().contains("pokeapi-pokemon-0"));
}

// ---------------------------------------------------------------------------
// TeamStore
// ---------------------------------------------------------------------------

#[test]
fn teams_save_and_load() {
    let (sdk, _tmp) = temp_sdk();
    let mut team = TeamBuilder::new();
    team.add(member(445, "Garchomp", &[Dragon, Ground]));
    team.add(member(479, "Rotom", &[Electric, Water]));

    let saved = sdk.teams().save("Sand Core", &team).unwrap();
    assert_eq!(saved.synergy, team.synergy_score());
    assert_eq!(sdk.teams().list().unwrap().len(), 1);

    let loaded = sdk.teams().load(&saved.id).unwrap().unwrap();
    assert_eq!(loaded.members(), team.members());

    assert!(sdk.teams().delete(&saved.id).unwrap());
    assert!(sdk.teams().list().unwrap().is_empty());
}

#[test]
fn team_save_rejects_blank_name_and_empty_team() {
    let (sdk, _tmp) = temp_sdk();
    let mut team = TeamBuilder::new();
    assert!(sdk.teams().save("Empty", &team).is_err());
    team.add(member(25, "Pikachu", &[Electric]));
    assert!(sdk.teams().save("  ", &team).is_err());
}

// ---------------------------------------------------------------------------
// PreferenceStore
// ---------------------------------------------------------------------------

#[test]
fn preferences_default_and_update() {
    let (sdk, _tmp) = temp_sdk();
    let prefs = sdk.preferences().get().unwrap();
    assert_eq!(prefs.theme, Theme::System);
    assert!(prefs.animations_enabled());

    let updated = sdk
        .preferences()
        .update(|p| {
            p.theme = Theme::Dark;
            p.reduced_motion = true;
        })
        .unwrap();
    assert!(!updated.animations_enabled());
    assert_eq!(sdk.preferences().get().unwrap().theme, Theme::Dark);
}

#[test]
fn partial_preference_blob_fills_defaults() {
    let (store, _tmp) = temp_store(1024 * 1024);
    store
        .set_persistent("uxPreferences", &serde_json::json!({"theme": "light"}))
        .unwrap();
    let prefs = PreferenceStore::new(&store).get().unwrap();
    assert_eq!(prefs.theme, Theme::Light);
    assert!(prefs.tooltips);
}

#[test]
fn tab_preference_round_trip() {
    let (sdk, _tmp) = temp_sdk();
    assert_eq!(sdk.preferences().tab(25).unwrap(), None);
    sdk.preferences().set_tab(25, "evolution").unwrap();
    assert_eq!(sdk.preferences().tab(25).unwrap().as_deref(), Some("evolution"));
}

#[test]
fn tab_cleanup_keeps_most_recent_fifty() {
    let (store, _tmp) = temp_store(1024 * 1024);
    let prefs = PreferenceStore::new(&store);
    for id in 1..=55 {
        prefs.set_tab(id, "stats").unwrap();
        std::thread::sleep(Duration::from_millis(2));
    }
    store.set_persistent("pocketDecks", &Vec::<String>::new()).unwrap();

    assert_eq!(prefs.cleanup_tab_preferences().unwrap(), 5);
    for id in 1..=5 {
        assert_eq!(prefs.tab(id).unwrap(), None);
    }
    assert_eq!(prefs.tab(55).unwrap().as_deref(), Some("stats"));
    assert!(store.contains("pocketDecks"));
}

#[test]
fn full_store_prunes_tab_preferences_and_retries() {
    let (mut store, _tmp) = temp_store(1024 * 1024);
    PreferenceStore::new(&store).set_tab(1, "stats").unwrap();
    let tab_size = store.usage_bytes().unwrap();
    store.quota_bytes = tab_size * 55;

    let prefs = PreferenceStore::new(&store);
    for id in 2..=55 {
        std::thread::sleep(Duration::from_millis(2));
        prefs.set_tab(id, "stats").unwrap();
    }
    std::thread::sleep(Duration::from_millis(2));
    prefs.set_tab(56, "moves").unwrap();

    assert_eq!(prefs.tab(56).unwrap().as_deref(), Some("moves"));
    for id in 1..=5 {
        assert_eq!(prefs.tab(id).unwrap(), None);
    }
    assert_eq!(prefs.tab(6).unwrap().as_deref(), Some("stats"));
}

// ---------------------------------------------------------------------------
// DextrendsSdk
// ---------------------------------------------------------------------------

#[test]
fn sdk_display_and_offline_flag() {
    let (sdk, tmp) = temp_sdk();
    assert!(sdk.is_offline());
    let display = sdk.to_string();
    assert!(display.starts_with("DextrendsSdk("));
    assert!(display.contains(&tmp.path().display().to_string()));
    assert!(display.contains("offline=true"));
}
