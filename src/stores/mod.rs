//! Persistence views over the SDK's [`LocalStore`](crate::storage::LocalStore).
//!
//! Each view is a lightweight wrapper borrowing the store, obtained from the
//! matching accessor on [`DextrendsSdk`](crate::DextrendsSdk).

pub mod alerts;
pub mod collection;
pub mod decks;
pub mod preferences;
pub mod teams;

pub use alerts::AlertStore;
pub use collection::CollectionStore;
pub use decks::DeckLibrary;
pub use preferences::{PreferenceStore, TabPreference};
pub use teams::TeamStore;

use chrono::Utc;
use rand::Rng;

/// `<prefix>_<millis>_<random>` identifier for saved records.
pub(crate) fn record_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}
