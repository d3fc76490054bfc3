use chrono::Utc;

use crate::config::keys;
use crate::error::{DextrendsError, Result};
use crate::models::SavedTeam;
use crate::storage::LocalStore;
use crate::team::TeamBuilder;

/// Named teams saved from the team builder.
pub struct TeamStore<'a> {
    store: &'a LocalStore,
}

impl<'a> TeamStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<SavedTeam>> {
        Ok(self.store.get(keys::SAVED_TEAMS)?.unwrap_or_default())
    }

    /// Save the current roster under `name`.
    pub fn save(&self, name: &str, team: &TeamBuilder) -> Result<SavedTeam> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DextrendsError::InvalidArgument(
                "Team name must not be empty".to_string(),
            ));
        }
        if team.is_empty() {
            return Err(DextrendsError::InvalidArgument(
                "Cannot save an empty team".to_string(),
            ));
        }

        let saved = SavedTeam {
            id: super::record_id("team"),
            name: name.to_string(),
            members: team.members().to_vec(),
            synergy: team.synergy_score(),
            saved_at: Utc::now(),
        };
        let mut teams = self.list()?;
        teams.push(saved.clone());
        self.store.set_persistent(keys::SAVED_TEAMS, &teams)?;
        tracing::info!(id = %saved.id, name = %saved.name, size = saved.members.len(), "team saved");
        Ok(saved)
    }

    pub fn load(&self, id: &str) -> Result<Option<TeamBuilder>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|t| t.id == id)
            .map(|t| TeamBuilder::from_members(t.members)))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut teams = self.list()?;
        let before = teams.len();
        teams.retain(|t| t.id != id);
        if teams.len() == before {
            return Ok(false);
        }
        self.store.set_persistent(keys::SAVED_TEAMS, &teams)?;
        Ok(true)
    }
}
