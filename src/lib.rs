//! DexTrends SDK for Rust.
//!
//! Domain logic for a Pokémon TCG companion: a deck builder with text, JSON
//! and share-code import/export, a filterable card browser, a team builder
//! with type-coverage and synergy analysis, a collection tracker and price
//! alerts. User data is persisted in a quota-bounded local key-value store.
//!
//! # Quick start
//!
//! ```no_run
//! use dextrends_sdk::DextrendsSdk;
//! use dextrends_sdk::team::TeamBuilder;
//!
//! let sdk = DextrendsSdk::builder().build().unwrap();
//!
//! let mut team = TeamBuilder::new();
//! team.add(sdk.fetch_pokemon("garchomp").unwrap());
//! team.add(sdk.fetch_pokemon("rotom-wash").unwrap());
//! println!("synergy: {}", team.synergy_score());
//!
//! sdk.teams().save("Sand", &team).unwrap();
//! ```

pub mod alerts;
#[cfg(feature = "async")]
pub mod async_client;
pub mod browser;
pub mod collection;
pub mod config;
pub mod deck;
pub mod error;
pub mod models;
pub mod pokeapi;
pub mod storage;
pub mod stores;
pub mod team;
pub mod type_chart;

pub use alerts::PriceAlertBook;
#[cfg(feature = "async")]
pub use async_client::AsyncDextrendsSdk;
pub use browser::CardBrowser;
pub use collection::CollectionTracker;
pub use deck::DeckBuilder;
pub use error::{DextrendsError, Result};
pub use storage::LocalStore;
pub use team::TeamBuilder;
pub use type_chart::PokemonType;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use models::TeamPokemon;
use pokeapi::PokeApiClient;

// ---------------------------------------------------------------------------
// DextrendsSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DextrendsSdk`] instance.
///
/// Use [`DextrendsSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DextrendsSdkBuilder::build) to create the SDK.
pub struct DextrendsSdkBuilder {
    storage_dir: Option<PathBuf>,
    quota_bytes: u64,
    offline: bool,
    timeout: Duration,
}

impl Default for DextrendsSdkBuilder {
    fn default() -> Self {
        Self {
            storage_dir: None,
            quota_bytes: config::DEFAULT_QUOTA_BYTES,
            offline: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DextrendsSdkBuilder {
    /// Set a custom storage directory.
    ///
    /// If not set, a `dextrends` directory under the platform's local data
    /// directory is used.
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Cap the bytes the local store may hold. Defaults to 5 MiB.
    pub fn quota_bytes(mut self, quota: u64) -> Self {
        self.quota_bytes = quota;
        self
    }

    /// When offline, Pokémon lookups are served from the cache only.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// HTTP timeout for PokéAPI requests. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open the local store. No network request is made here.
    pub fn build(self) -> Result<DextrendsSdk> {
        let store = LocalStore::new(self.storage_dir, self.quota_bytes)?;
        let removed = store.cleanup()?;
        tracing::debug!(
            dir = %store.storage_dir.display(),
            removed,
            "local store opened"
        );
        Ok(DextrendsSdk {
            store,
            pokeapi: PokeApiClient::new(self.offline, self.timeout),
        })
    }
}

// ---------------------------------------------------------------------------
// DextrendsSdk
// ---------------------------------------------------------------------------

/// The main entry point for the DexTrends SDK.
///
/// Owns the [`LocalStore`] and exposes persistence views as lightweight
/// borrowing wrappers. In-memory builders such as [`DeckBuilder`] and
/// [`TeamBuilder`] are used directly and saved through those views.
///
/// Created via [`DextrendsSdk::builder()`].
pub struct DextrendsSdk {
    store: LocalStore,
    pokeapi: PokeApiClient,
}

impl DextrendsSdk {
    pub fn builder() -> DextrendsSdkBuilder {
        DextrendsSdkBuilder::default()
    }

    // -- Store accessors ---------------------------------------------------

    /// Saved decks.
    pub fn decks(&self) -> stores::DeckLibrary<'_> {
        stores::DeckLibrary::new(&self.store)
    }

    /// The persisted card collection.
    pub fn collection(&self) -> stores::CollectionStore<'_> {
        stores::CollectionStore::new(&self.store)
    }

    /// Price alerts and their notification settings.
    pub fn alerts(&self) -> stores::AlertStore<'_> {
        stores::AlertStore::new(&self.store)
    }

    pub fn teams(&self) -> stores::TeamStore<'_> {
        stores::TeamStore::new(&self.store)
    }

    /// Site preferences and per-Pokémon tab memory.
    pub fn preferences(&self) -> stores::PreferenceStore<'_> {
        stores::PreferenceStore::new(&self.store)
    }

    // -- Remote data -------------------------------------------------------

    /// Fetch a Pokémon from PokéAPI by pokédex number or name, using the
    /// local cache when fresh.
    pub fn fetch_pokemon(&self, id_or_name: &str) -> Result<TeamPokemon> {
        self.pokeapi.pokemon(&self.store, id_or_name)
    }

    // -- Utility -----------------------------------------------------------

    /// The underlying store, for advanced usage.
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn is_offline(&self) -> bool {
        self.pokeapi.offline
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DextrendsSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DextrendsSdk(storage_dir={}, quota_bytes={}, offline={})",
            self.store.storage_dir.display(),
            self.store.quota_bytes,
            self.pokeapi.offline
        )
    }
}
