use crate::collection::CollectionTracker;
use crate::config::keys;
use crate::error::Result;
use crate::models::CollectionCard;
use crate::storage::LocalStore;

/// The persisted card collection.
pub struct CollectionStore<'a> {
    store: &'a LocalStore,
}

impl<'a> CollectionStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Load the collection; empty when nothing was saved yet.
    pub fn load(&self) -> Result<CollectionTracker> {
        let cards: Vec<CollectionCard> = self.store.get(keys::COLLECTION)?.unwrap_or_default();
        Ok(CollectionTracker::from_cards(cards))
    }

    pub fn save(&self, tracker: &CollectionTracker) -> Result<()> {
        self.store.set_persistent(keys::COLLECTION, &tracker.cards())
    }
}
