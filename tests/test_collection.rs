//! Tests for the collection tracker.

mod common;

use chrono::{Duration, Utc};
use std::collections::BTreeMap;

use dextrends_sdk::collection::{CollectionQuery, CollectionSort, CollectionTab, ImportMode};
use dextrends_sdk::models::{CardUpdate, Condition};
use dextrends_sdk::CollectionTracker;

use common::collection_card;

fn sample_tracker() -> CollectionTracker {
    let now = Utc::now();
    let mut charizard = collection_card("base1-4", "Charizard", "base1", Some(350.0));
    charizard.rarity = "Rare Holo".to_string();
    charizard.date_added = now - Duration::days(3);
    let mut pikachu = collection_card("base1-58", "Pikachu", "base1", Some(2.5));
    pikachu.quantity = 4;
    pikachu.date_added = now - Duration::days(1);
    let mut mewtwo = collection_card("base2-10", "Mewtwo", "base2", Some(40.0));
    mewtwo.rarity = "Rare".to_string();
    mewtwo.in_wishlist = Some(true);
    mewtwo.date_added = now;
    CollectionTracker::from_cards(vec![charizard, pikachu, mewtwo])
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn add_new_card_then_increment() {
    let mut tracker = CollectionTracker::new();
    let mut card = collection_card("sv1-1", "Sprigatito", "sv1", None);
    card.date_added = Utc::now() - Duration::days(30);

    tracker.add(card.clone());
    let added = tracker.get("sv1-1").unwrap();
    assert_eq!(added.quantity, 1);
    assert!(added.date_added > Utc::now() - Duration::minutes(1));

    tracker.add(card);
    assert_eq!(tracker.get("sv1-1").unwrap().quantity, 2);
    assert_eq!(tracker.cards().len(), 1);
}

#[test]
fn update_applies_only_given_fields() {
    let mut tracker = sample_tracker();
    assert!(tracker.update(
        "base1-4",
        CardUpdate {
            condition: Some(Condition::LP),
            notes: Some("Shadowless".to_string()),
            ..Default::default()
        }
    ));
    let card = tracker.get("base1-4").unwrap();
    assert_eq!(card.condition, Condition::LP);
    assert_eq!(card.notes.as_deref(), Some("Shadowless"));
    assert_eq!(card.current_price, Some(350.0));

    assert!(!tracker.update("missing", CardUpdate::default()));
}

#[test]
fn remove_and_toggles() {
    let mut tracker = sample_tracker();
    assert!(tracker.toggle_wishlist("base1-58"));
    assert!(tracker.get("base1-58").unwrap().wishlisted());
    assert!(tracker.toggle_wishlist("base1-58"));
    assert!(!tracker.get("base1-58").unwrap().wishlisted());

    assert!(tracker.toggle_trade_list("base1-4"));
    assert!(tracker.get("base1-4").unwrap().for_trade());
    assert!(!tracker.toggle_trade_list("missing"));

    assert!(tracker.remove("base2-10"));
    assert!(!tracker.remove("base2-10"));
    assert_eq!(tracker.cards().len(), 2);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[test]
fn stats_sum_quantities_and_values() {
    let stats = sample_tracker().stats();
    assert_eq!(stats.total_cards, 6);
    assert_eq!(stats.unique_cards, 3);
    assert!((stats.total_value - 400.0).abs() < 1e-9);
    assert_eq!(stats.wishlist_count, 1);
    assert_eq!(stats.trade_list_count, 0);
}

#[test]
fn set_progress_per_set() {
    let mut sizes = BTreeMap::new();
    sizes.insert("base1".to_string(), 102);
    let progress = sample_tracker().set_progress(&sizes);

    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].set_id, "base1");
    assert_eq!(progress[0].owned_cards, 5);
    assert!((progress[0].completion_percent - 2.0 / 102.0 * 100.0).abs() < 1e-9);
    assert!((progress[0].estimated_value - 360.0).abs() < 1e-9);
    assert_eq!(progress[1].total_cards, 0);
    assert_eq!(progress[1].completion_percent, 0.0);
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn default_query_reverses_date_order() {
    let tracker = sample_tracker();
    let ids: Vec<&str> = tracker
        .query(&CollectionQuery::default())
        .iter()
        .map(|c| c.card_id.as_str())
        .collect();
    assert_eq!(ids, vec!["base1-4", "base1-58", "base2-10"]);
}

#[test]
fn tabs_search_and_set_filter() {
    let tracker = sample_tracker();

    let wishlist = tracker.query(&CollectionQuery {
        tab: CollectionTab::Wishlist,
        ..Default::default()
    });
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist[0].name, "Mewtwo");

    let search = tracker.query(&CollectionQuery {
        search: "CHAR".to_string(),
        ..Default::default()
    });
    assert_eq!(search.len(), 1);

    let by_number = tracker.query(&CollectionQuery {
        search: "58".to_string(),
        ..Default::default()
    });
    assert_eq!(by_number[0].name, "Pikachu");

    let base2 = tracker.query(&CollectionQuery {
        set_id: Some("base2".to_string()),
        ..Default::default()
    });
    assert_eq!(base2.len(), 1);

    let trades = tracker.query(&CollectionQuery {
        tab: CollectionTab::Tradelist,
        ..Default::default()
    });
    assert!(trades.is_empty());
}

#[test]
fn sort_keys() {
    let tracker = sample_tracker();
    let sorted = |sort_by, ascending| -> Vec<String> {
        tracker
            .query(&CollectionQuery {
                sort_by,
                ascending,
                ..Default::default()
            })
            .iter()
            .map(|c| c.name.clone())
            .collect()
    };

    assert_eq!(
        sorted(CollectionSort::Name, true),
        vec!["Charizard", "Mewtwo", "Pikachu"]
    );
    assert_eq!(
        sorted(CollectionSort::Value, true),
        vec!["Charizard", "Mewtwo", "Pikachu"]
    );
    assert_eq!(
        sorted(CollectionSort::Rarity, true),
        vec!["Pikachu", "Mewtwo", "Charizard"]
    );
    assert_eq!(
        sorted(CollectionSort::DateAdded, true),
        vec!["Mewtwo", "Pikachu", "Charizard"]
    );
}

#[test]
fn pages_hold_twenty_cards() {
    let cards = (0..45)
        .map(|i| collection_card(&format!("set-{i}"), &format!("Card {i:02}"), "set", None))
        .collect();
    let tracker = CollectionTracker::from_cards(cards);
    let q = CollectionQuery::default();
    assert_eq!(tracker.total_pages(&q), 3);
    assert_eq!(tracker.page(&q, 1).len(), 20);
    assert_eq!(tracker.page(&q, 3).len(), 5);
    assert!(tracker.page(&q, 4).is_empty());
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

#[test]
fn json_export_and_import() {
    let tracker = sample_tracker();
    let exported = tracker.export_json().unwrap();
    let json: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["stats"]["totalCards"], 6);
    assert!(json["exportedAt"].is_string());
    assert_eq!(json["collection"][0]["cardId"], "base1-4");

    let mut restored = CollectionTracker::new();
    assert_eq!(restored.import_json(&exported, ImportMode::Replace).unwrap(), 3);
    assert_eq!(restored.cards(), tracker.cards());
}

#[test]
fn import_requires_collection_array() {
    let mut tracker = sample_tracker();
    assert!(tracker
        .import_json(r#"{"cards": []}"#, ImportMode::Replace)
        .is_err());
    assert!(tracker.import_json("not json", ImportMode::Merge).is_err());
    assert_eq!(tracker.cards().len(), 3);
}

#[test]
fn json_merge_skips_known_ids() {
    let mut tracker = sample_tracker();
    tracker.update(
        "base1-4",
        CardUpdate {
            quantity: Some(3),
            ..Default::default()
        },
    );

    let mut incoming = CollectionTracker::new();
    incoming.add(collection_card("base1-4", "Charizard", "base1", Some(1.0)));
    incoming.add(collection_card("neo1-9", "Lugia", "neo1", Some(90.0)));
    let exported = incoming.export_json().unwrap();

    assert_eq!(tracker.import_json(&exported, ImportMode::Merge).unwrap(), 1);
    assert_eq!(tracker.cards().len(), 4);
    assert_eq!(tracker.get("base1-4").unwrap().quantity, 3);
    assert_eq!(tracker.get("base1-4").unwrap().current_price, Some(350.0));
    assert_eq!(tracker.get("neo1-9").unwrap().name, "Lugia");
}

#[test]
fn csv_export_has_header_and_rows() {
    let mut tracker = sample_tracker();
    tracker.update(
        "base1-4",
        CardUpdate {
            purchase_price: Some(200.0),
            notes: Some("Graded, PSA 9".to_string()),
            ..Default::default()
        },
    );
    let csv = tracker.export_csv().unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Card ID,Card Name,Set Name,Quantity,Condition,Purchase Price,Notes,Date Added"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("base1-4,Charizard,BASE1 Set,1,Near Mint,200.00,\"Graded, PSA 9\","));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn csv_round_trip() {
    let mut tracker = sample_tracker();
    tracker.update(
        "base1-4",
        CardUpdate {
            condition: Some(Condition::LP),
            purchase_price: Some(200.0),
            notes: Some("Graded, PSA 9".to_string()),
            ..Default::default()
        },
    );
    let csv = tracker.export_csv().unwrap();

    let mut restored = CollectionTracker::new();
    assert_eq!(restored.import_csv(&csv, ImportMode::Replace).unwrap(), 3);
    for (before, after) in tracker.cards().iter().zip(restored.cards()) {
        assert_eq!(after.card_id, before.card_id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.set_name, before.set_name);
        assert_eq!(after.quantity, before.quantity);
        assert_eq!(after.condition, before.condition);
        assert_eq!(after.purchase_price, before.purchase_price);
        assert_eq!(after.date_added, before.date_added);
    }
    let zard = restored.get("base1-4").unwrap();
    assert_eq!(zard.set_id, "base1");
    assert_eq!(zard.number, "4");
    assert_eq!(zard.notes.as_deref(), Some("Graded, PSA 9"));
}

#[test]
fn csv_import_defaults_and_skips_incomplete_rows() {
    let mut tracker = CollectionTracker::new();
    let csv = "card id,name,qty\nsv1-1,Sprigatito,\n,Nameless,2\nsv1-4,Fuecoco,3\n";
    assert_eq!(tracker.import_csv(csv, ImportMode::Replace).unwrap(), 2);

    let sprig = tracker.get("sv1-1").unwrap();
    assert_eq!(sprig.quantity, 1);
    assert_eq!(sprig.condition, Condition::NM);
    assert_eq!(sprig.set_name, "Unknown Set");
    assert_eq!(tracker.get("sv1-4").unwrap().quantity, 3);
}

#[test]
fn csv_import_requires_id_and_name_columns() {
    let mut tracker = sample_tracker();
    let err = tracker
        .import_csv("Name,Quantity\nPikachu,1\n", ImportMode::Replace)
        .unwrap_err();
    assert!(err.to_string().contains("Card ID and Card Name"));
    assert_eq!(tracker.cards().len(), 3);
}

#[test]
fn csv_import_rejects_empty_input() {
    let mut tracker = CollectionTracker::new();
    assert!(tracker.import_csv("", ImportMode::Replace).is_err());
    let err = tracker
        .import_csv("Card ID,Card Name\n", ImportMode::Replace)
        .unwrap_err();
    assert!(err.to_string().contains("No valid cards found in CSV"));
}

#[test]
fn csv_merge_keeps_existing_cards() {
    let mut tracker = sample_tracker();
    let csv = "Card ID,Card Name\nbase1-4,Charizard\nbase1-2,Blastoise\n";
    assert_eq!(tracker.import_csv(csv, ImportMode::Merge).unwrap(), 1);
    assert_eq!(tracker.cards().len(), 4);
    assert_eq!(tracker.get("base1-4").unwrap().current_price, Some(350.0));
}
