//! Site preferences and the last-viewed tab per Pokémon.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{self, keys};
use crate::error::{DextrendsError, Result};
use crate::models::Preferences;
use crate::storage::LocalStore;

/// Last tab viewed on a Pokémon's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPreference {
    pub tab: String,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
}

pub struct PreferenceStore<'a> {
    store: &'a LocalStore,
}

impl<'a> PreferenceStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Saved preferences, or the defaults.
    pub fn get(&self) -> Result<Preferences> {
        Ok(self.store.get(keys::PREFERENCES)?.unwrap_or_default())
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        self.store.set_persistent(keys::PREFERENCES, prefs)
    }

    /// Apply `f` to the saved preferences and persist the result.
    pub fn update<F: FnOnce(&mut Preferences)>(&self, f: F) -> Result<Preferences> {
        let mut prefs = self.get()?;
        f(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    // -- Tab preferences ---------------------------------------------------

    pub fn tab(&self, pokemon_id: u32) -> Result<Option<String>> {
        let pref: Option<TabPreference> = self.store.get(&tab_key(pokemon_id))?;
        Ok(pref.map(|p| p.tab))
    }

    /// Remember the tab last viewed for a Pokémon.
    ///
    /// When storage is full, old tab preferences are pruned and the write
    /// is retried once.
    pub fn set_tab(&self, pokemon_id: u32, tab: &str) -> Result<()> {
        let key = tab_key(pokemon_id);
        let pref = TabPreference {
            tab: tab.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };
        match self.store.set_persistent(&key, &pref) {
            Err(DextrendsError::QuotaExceeded { .. }) => {
                tracing::warn!(pokemon_id, "storage quota exceeded, pruning tab preferences");
                self.cleanup_tab_preferences()?;
                self.store.set_persistent(&key, &pref)
            }
            other => other,
        }
    }

    /// Drop expired entries and all but the most recent tab preferences.
    /// Returns how many tab preferences were removed.
    pub fn cleanup_tab_preferences(&self) -> Result<usize> {
        self.store.cleanup()?;

        let mut tabs: Vec<(String, i64)> = self
            .store
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(keys::TAB_PREFIX))
            .map(|k| {
                let ts = self
                    .store
                    .get::<TabPreference>(&k)
                    .ok()
                    .flatten()
                    .map_or(0, |p| p.timestamp);
                (k, ts)
            })
            .collect();
        tabs.sort_by(|a, b| b.1.cmp(&a.1));

        let mut removed = 0;
        for (key, _) in tabs.iter().skip(config::MAX_TAB_PREFERENCES) {
            if self.store.remove(key)? {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!(removed, "old tab preferences removed");
        }
        Ok(removed)
    }
}

fn tab_key(pokemon_id: u32) -> String {
    format!("{}{}", keys::TAB_PREFIX, pokemon_id)
}
