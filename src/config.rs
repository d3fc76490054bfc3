use std::path::PathBuf;
use std::time::Duration;

pub const POKEAPI_BASE: &str = "https://pokeapi.co/api/v2";

/// Prefix applied to every blob written by [`LocalStore`](crate::storage::LocalStore).
pub const STORAGE_PREFIX: &str = "dextrends_cache_";

/// Default time-to-live for cached API responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default storage quota, roughly what browsers grant `localStorage`.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

pub const STORAGE_VERSION: &str = "1.0";

// Pocket TCG
pub const POCKET_DECK_SIZE: usize = 20;
pub const POCKET_MAX_COPIES: u32 = 2;

// Standard TCG
pub const STANDARD_DECK_SIZE: usize = 60;
pub const STANDARD_MAX_COPIES: u32 = 4;

pub const MAX_TEAM_SIZE: usize = 6;

pub const COLLECTION_PAGE_SIZE: usize = 20;
pub const ALERT_PAGE_SIZE: usize = 10;
pub const BROWSER_PAGE_SIZE: usize = 24;

/// Tab preferences kept when storage is full; older ones are dropped.
pub const MAX_TAB_PREFERENCES: usize = 50;

/// Storage keys used by the persistence views in [`crate::stores`].
pub mod keys {
    pub const SAVED_DECKS: &str = "pocketDecks";
    pub const COLLECTION: &str = "cardCollection";
    pub const PRICE_ALERTS: &str = "priceAlerts";
    pub const ALERT_SETTINGS: &str = "priceAlertSettings";
    pub const SAVED_TEAMS: &str = "savedTeams";
    pub const PREFERENCES: &str = "uxPreferences";
    pub const TAB_PREFIX: &str = "pokemon-tab-";
    pub const POKEAPI_PREFIX: &str = "pokeapi-pokemon-";
}

/// Pocket booster packs in release order. Used to order pack filter options.
pub const ALL_PACKS: &[&str] = &[
    "Charizard",
    "Mewtwo",
    "Pikachu",
    "Mythical Island",
    "Apex",
    "Mythical",
    "Celestial",
    "Eevee Grove",
    "Dialga",
    "Palkia",
    "Triumphant Light",
    "Shining Revelry",
    "Solgaleo",
    "Lunala",
    "Extradimensional Crisis",
];

/// Rarity ladder used when sorting collections by rarity.
pub const RARITY_ORDER: &[&str] = &[
    "Common",
    "Uncommon",
    "Rare",
    "Rare Holo",
    "Rare Holo EX",
    "Rare Holo V",
    "Rare Ultra",
    "Rare Secret",
];

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("dextrends")
    } else {
        PathBuf::from(".dextrends-data")
    }
}
