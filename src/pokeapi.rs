//! PokéAPI client for team-builder lookups, cached through [`LocalStore`].

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

use crate::config;
use crate::error::{DextrendsError, Result};
use crate::models::{BaseStats, TeamPokemon};
use crate::storage::LocalStore;
use crate::type_chart::PokemonType;

pub struct PokeApiClient {
    /// Never touch the network; only cached responses are served.
    pub offline: bool,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl PokeApiClient {
    pub fn new(offline: bool, timeout: Duration) -> Self {
        Self {
            offline,
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    /// Look up a Pokémon by pokédex number or name.
    ///
    /// A cached copy younger than the default TTL is returned without a
    /// request.
    pub fn pokemon(&self, store: &LocalStore, id_or_name: &str) -> Result<TeamPokemon> {
        let ident = id_or_name.trim().to_lowercase();
        if ident.is_empty() {
            return Err(DextrendsError::InvalidArgument(
                "Pokemon id or name must not be empty".to_string(),
            ));
        }
        let key = format!("{}{}", config::keys::POKEAPI_PREFIX, ident);

        if let Some(cached) = store.get::<TeamPokemon>(&key)? {
            tracing::debug!(pokemon = %ident, "pokeapi cache hit");
            return Ok(cached);
        }

        if self.offline {
            return Err(DextrendsError::NotFound(format!(
                "Pokemon {} not cached and offline mode is enabled",
                ident
            )));
        }

        let url = format!("{}/pokemon/{}", config::POKEAPI_BASE, ident);
        tracing::info!(url = %url, "fetching pokemon");
        let resp = self.client()?.get(&url).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(DextrendsError::NotFound(format!("Pokemon {}", ident)));
        }
        let body: Value = resp.error_for_status()?.json()?;
        let pokemon = parse_pokemon(&body)?;

        if let Err(e) = store.set(&key, &pokemon, config::DEFAULT_TTL) {
            tracing::warn!(pokemon = %ident, error = %e, "failed to cache pokemon");
        }
        Ok(pokemon)
    }
}

/// Map a PokéAPI `/pokemon/{id}` response onto a roster entry.
///
/// Types come from the slot list in slot order. Unknown stat or type names
/// are ignored.
pub fn parse_pokemon(body: &Value) -> Result<TeamPokemon> {
    let pokedex_id = body
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| DextrendsError::InvalidArgument("Pokemon response has no id".into()))?;
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| DextrendsError::InvalidArgument("Pokemon response has no name".into()))?;

    let mut slots: Vec<(u64, PokemonType)> = body
        .get("types")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(|t| {
                    let slot = t.get("slot").and_then(Value::as_u64).unwrap_or(0);
                    let type_name = t.pointer("/type/name").and_then(Value::as_str)?;
                    type_name.parse::<PokemonType>().ok().map(|pt| (slot, pt))
                })
                .collect()
        })
        .unwrap_or_default();
    slots.sort_by_key(|(slot, _)| *slot);
    let types: Vec<PokemonType> = slots.into_iter().map(|(_, t)| t).collect();

    let stats = body.get("stats").and_then(Value::as_array).map(|stats| {
        let mut base = BaseStats::default();
        for stat in stats {
            let value = stat
                .get("base_stat")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32;
            match stat.pointer("/stat/name").and_then(Value::as_str) {
                Some("hp") => base.hp = value,
                Some("attack") => base.attack = value,
                Some("defense") => base.defense = value,
                Some("special-attack") => base.special_attack = value,
                Some("special-defense") => base.special_defense = value,
                Some("speed") => base.speed = value,
                _ => {}
            }
        }
        base
    });

    let mut pokemon = TeamPokemon::new(pokedex_id, name, &types);
    pokemon.stats = stats;
    pokemon.sprite = body
        .pointer("/sprites/front_default")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(pokemon)
}
