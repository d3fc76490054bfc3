//! Saved decks, persisted as one list under a single key.

use chrono::Utc;

use crate::config::keys;
use crate::deck::{DeckBuilder, DeckConfig};
use crate::error::Result;
use crate::models::SavedDeck;
use crate::storage::LocalStore;

const UNNAMED_DECK: &str = "Unnamed Deck";

pub struct DeckLibrary<'a> {
    store: &'a LocalStore,
}

impl<'a> DeckLibrary<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// All saved decks, oldest first.
    pub fn list(&self) -> Result<Vec<SavedDeck>> {
        Ok(self.store.get(keys::SAVED_DECKS)?.unwrap_or_default())
    }

    /// Snapshot the builder's deck. Returns `None` for an empty deck.
    pub fn save(&self, deck: &DeckBuilder) -> Result<Option<SavedDeck>> {
        if deck.total_cards() == 0 {
            return Ok(None);
        }

        let now = Utc::now();
        let name = deck.name().trim();
        let saved = SavedDeck {
            id: super::record_id("deck"),
            name: if name.is_empty() {
                UNNAMED_DECK.to_string()
            } else {
                name.to_string()
            },
            format: deck.format(),
            cards: deck.entries().to_vec(),
            stats: deck.stats(),
            created_at: now,
            updated_at: Some(now),
        };

        let mut decks = self.list()?;
        decks.push(saved.clone());
        self.store.set_persistent(keys::SAVED_DECKS, &decks)?;
        tracing::info!(id = %saved.id, name = %saved.name, cards = saved.stats.total_cards, "deck saved");
        Ok(Some(saved))
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedDeck>> {
        Ok(self.list()?.into_iter().find(|d| d.id == id))
    }

    /// Open a saved deck in a new builder using its format's limits.
    pub fn load(&self, id: &str) -> Result<Option<DeckBuilder>> {
        Ok(self.get(id)?.map(|saved| {
            DeckBuilder::from_entries(
                saved.format,
                DeckConfig::for_format(saved.format),
                &saved.name,
                saved.cards,
            )
        }))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut decks = self.list()?;
        let before = decks.len();
        decks.retain(|d| d.id != id);
        if decks.len() == before {
            return Ok(false);
        }
        self.store.set_persistent(keys::SAVED_DECKS, &decks)?;
        Ok(true)
    }
}
