//! Shared test fixtures for the DexTrends SDK integration tests.
//!
//! Provides a temp-dir backed [`LocalStore`], a small Pocket card pool and
//! builders for collection cards and roster members.

#![allow(dead_code)]

use chrono::Utc;
use dextrends_sdk::models::{CollectionCard, Condition, PocketCard, TeamPokemon};
use dextrends_sdk::type_chart::PokemonType;
use dextrends_sdk::{DextrendsSdk, LocalStore};

/// Create a `LocalStore` in a fresh temporary directory.
///
/// The caller must keep the returned `TempDir` alive for the duration of the
/// test so the directory is not deleted prematurely.
pub fn temp_store(quota_bytes: u64) -> (LocalStore, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(Some(tmp_dir.path().to_path_buf()), quota_bytes).unwrap();
    (store, tmp_dir)
}

/// Offline SDK rooted in a temporary directory.
pub fn temp_sdk() -> (DextrendsSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = DextrendsSdk::builder()
        .storage_dir(tmp_dir.path())
        .offline(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

fn pokemon_card(
    id: &str,
    name: &str,
    type_: &str,
    hp: &str,
    pack: &str,
    rarity: &str,
    stage: &str,
) -> PocketCard {
    PocketCard {
        type_field: Some(type_.to_string()),
        health: Some(hp.to_string()),
        pack: Some(pack.to_string()),
        rarity: Some(rarity.to_string()),
        stage: Some(stage.to_string()),
        category: Some("Pokemon".to_string()),
        ..PocketCard::new(id, name)
    }
}

fn trainer_card(id: &str, name: &str, pack: &str) -> PocketCard {
    PocketCard {
        type_field: Some("Trainer".to_string()),
        pack: Some(pack.to_string()),
        rarity: Some("◊◊".to_string()),
        ..PocketCard::new(id, name)
    }
}

/// A small card pool covering Pokémon of several types and common trainers.
pub fn sample_cards() -> Vec<PocketCard> {
    vec![
        pokemon_card("a1-094", "Pikachu ex", "Lightning", "120", "Pikachu", "◊◊◊◊", "Basic"),
        pokemon_card("a1-095", "Raichu", "Lightning", "100", "Pikachu", "◊◊◊", "Stage 1"),
        pokemon_card("a1-036", "Charizard ex", "Fire", "180", "Charizard", "◊◊◊◊", "Stage 2"),
        pokemon_card("a1-047", "Moltres ex", "Fire", "140", "Charizard", "◊◊◊◊", "Basic"),
        pokemon_card("a1-129", "Mewtwo ex", "Psychic", "150", "Mewtwo", "◊◊◊◊", "Basic"),
        pokemon_card("a1-076", "Starmie ex", "Water", "130", "Mewtwo", "◊◊◊◊", "Stage 1"),
        pokemon_card("a1-001", "Bulbasaur", "Grass", "70", "Mewtwo", "◊", "Basic"),
        trainer_card("pa-007", "Professor's Research", "Pikachu"),
        trainer_card("pa-005", "Poké Ball", "Pikachu"),
        trainer_card("pa-001", "Potion", "Charizard"),
        trainer_card("a1-225", "Sabrina", "Mewtwo"),
        trainer_card("a2-147", "Giant Cape", "Mythical Island"),
    ]
}

/// Look up a card from [`sample_cards`] by id.
pub fn card(cards: &[PocketCard], id: &str) -> PocketCard {
    cards.iter().find(|c| c.id == id).cloned().unwrap()
}

pub fn collection_card(id: &str, name: &str, set_id: &str, price: Option<f64>) -> CollectionCard {
    CollectionCard {
        card_id: id.to_string(),
        name: name.to_string(),
        set_id: set_id.to_string(),
        set_name: format!("{} Set", set_id.to_uppercase()),
        number: id.rsplit('-').next().unwrap_or_default().to_string(),
        rarity: "Common".to_string(),
        image: String::new(),
        types: None,
        quantity: 1,
        condition: Condition::NM,
        is_first_edition: None,
        is_foil: None,
        purchase_price: None,
        current_price: price,
        date_added: Utc::now(),
        notes: None,
        in_wishlist: None,
        in_trade_list: None,
    }
}

pub fn member(pokedex_id: u32, name: &str, types: &[PokemonType]) -> TeamPokemon {
    TeamPokemon::new(pokedex_id, name, types)
}
