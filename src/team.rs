//! Team building with type-coverage analysis and synergy scoring.

use chrono::Utc;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::config;
use crate::error::{DextrendsError, Result};
use crate::models::{BaseStats, ExportedMember, TeamExport, TeamPokemon, TypeCoverage};
use crate::type_chart::{super_effective_targets, DefensiveProfile, PokemonType};

/// A roster of at most six Pokémon.
#[derive(Debug, Clone, Default)]
pub struct TeamBuilder {
    members: Vec<TeamPokemon>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a team from existing members, keeping at most six.
    pub fn from_members(mut members: Vec<TeamPokemon>) -> Self {
        members.truncate(config::MAX_TEAM_SIZE);
        Self { members }
    }

    pub fn members(&self) -> &[TeamPokemon] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= config::MAX_TEAM_SIZE
    }

    // -- Roster operations -------------------------------------------------

    /// Append a member. Returns `false` when the team is already full.
    pub fn add(&mut self, pokemon: TeamPokemon) -> bool {
        if self.is_full() {
            tracing::warn!(name = %pokemon.name, "team is full");
            return false;
        }
        self.members.push(pokemon);
        true
    }

    /// Remove the member at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<TeamPokemon> {
        if index < self.members.len() {
            Some(self.members.remove(index))
        } else {
            None
        }
    }

    /// Move the member at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.members.len();
        if from >= len || to >= len {
            return Err(DextrendsError::InvalidArgument(format!(
                "Team slot out of range: {} -> {} (team size {})",
                from, to, len
            )));
        }
        let member = self.members.remove(from);
        self.members.insert(to, member);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    // -- Analysis ----------------------------------------------------------

    /// Offensive and defensive type counts across the team.
    pub fn coverage(&self) -> TypeCoverage {
        let mut coverage = TypeCoverage::default();

        for pokemon in &self.members {
            for attack in &pokemon.types {
                for target in super_effective_targets(*attack) {
                    coverage.offensive[target.index()] += 1;
                }
            }

            let profile = DefensiveProfile::of(&pokemon.types);
            for t in &profile.weaknesses {
                coverage.weaknesses[t.index()] += 1;
            }
            for t in &profile.resistances {
                coverage.resistances[t.index()] += 1;
            }
            for t in &profile.immunities {
                coverage.immunities[t.index()] += 1;
            }
        }

        coverage
    }

    /// Composite team rating in `0..=100`.
    ///
    /// Type diversity (up to 30), offensive coverage (up to 30), ratio of
    /// resistances to weaknesses (up to 25) and immunities (up to 15).
    pub fn synergy_score(&self) -> u32 {
        if self.members.is_empty() {
            return 0;
        }
        let coverage = self.coverage();
        let type_count = PokemonType::ALL.len() as f64;

        let unique_types: BTreeSet<PokemonType> = self
            .members
            .iter()
            .flat_map(|p| p.types.iter().copied())
            .collect();
        let diversity = (unique_types.len() as f64 * 5.0).min(30.0);

        let covered = coverage.offensive.iter().filter(|c| **c > 0).count() as f64;
        let offense = (covered / type_count * 30.0).min(30.0);

        let weak_total: u32 = coverage.weaknesses.iter().sum();
        let resist_total: u32 = coverage.resistances.iter().sum();
        let ratio = resist_total as f64 / weak_total.max(1) as f64;
        let defense = (ratio * 10.0).min(25.0);

        let immune_types = coverage.immunities.iter().filter(|c| **c > 0).count() as f64;
        let immunity = (immune_types * 5.0).min(15.0);

        let score = (diversity + offense + defense + immunity).round() as u32;
        score.min(100)
    }

    /// Human-readable composition problems.
    pub fn warnings(&self) -> Vec<String> {
        let coverage = self.coverage();
        let mut issues = Vec::new();

        let critical: Vec<&str> = PokemonType::ALL
            .iter()
            .filter(|t| coverage.weaknesses(**t) >= 3)
            .map(|t| t.as_str())
            .collect();
        if !critical.is_empty() {
            issues.push(format!(
                "Team has 3+ Pokemon weak to: {}",
                critical.join(", ")
            ));
        }

        let uncovered = coverage.uncovered();
        if uncovered.len() > 5 && self.members.len() >= 3 {
            let first: Vec<&str> = uncovered.iter().take(3).map(|t| t.as_str()).collect();
            issues.push(format!(
                "No super-effective coverage against: {}...",
                first.join(", ")
            ));
        }

        let mut type_counts: BTreeMap<PokemonType, u32> = BTreeMap::new();
        for pokemon in &self.members {
            for t in &pokemon.types {
                *type_counts.entry(*t).or_default() += 1;
            }
        }
        let redundant: Vec<&str> = type_counts
            .iter()
            .filter(|(_, count)| **count >= 3)
            .map(|(t, _)| t.as_str())
            .collect();
        if !redundant.is_empty() {
            issues.push(format!(
                "Type redundancy: {} (3+ Pokemon)",
                redundant.join(", ")
            ));
        }

        issues
    }

    /// Summed base stats of members with cached stats.
    pub fn stat_totals(&self) -> BaseStats {
        self.members
            .iter()
            .filter_map(|p| p.stats)
            .fold(BaseStats::default(), |acc, s| acc + s)
    }

    // -- Export ------------------------------------------------------------

    pub fn export(&self) -> TeamExport {
        let export = TeamExport {
            team: self
                .members
                .iter()
                .map(|p| ExportedMember {
                    id: p.pokedex_id,
                    name: p.name.clone(),
                    types: p.types.clone(),
                })
                .collect(),
            synergy: self.synergy_score(),
            exported_at: Utc::now(),
        };
        tracing::info!(team_size = self.members.len(), "team exported");
        export
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}
