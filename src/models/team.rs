use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::type_chart::PokemonType;

// ---------------------------------------------------------------------------
// BaseStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn total(&self) -> u32 {
        self.hp + self.attack + self.defense + self.special_attack + self.special_defense + self.speed
    }
}

impl std::ops::Add for BaseStats {
    type Output = BaseStats;

    fn add(self, rhs: BaseStats) -> BaseStats {
        BaseStats {
            hp: self.hp + rhs.hp,
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            special_attack: self.special_attack + rhs.special_attack,
            special_defense: self.special_defense + rhs.special_defense,
            speed: self.speed + rhs.speed,
        }
    }
}

// ---------------------------------------------------------------------------
// TeamPokemon — A roster slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPokemon {
    pub id: String,
    pub pokedex_id: u32,
    pub name: String,
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub sprite: String,
    pub stats: Option<BaseStats>,
}

impl TeamPokemon {
    pub fn new(pokedex_id: u32, name: &str, types: &[PokemonType]) -> Self {
        Self {
            id: format!("{}-{}", pokedex_id, name.to_lowercase()),
            pokedex_id,
            name: name.to_string(),
            types: types.to_vec(),
            sprite: String::new(),
            stats: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TypeCoverage — Aggregated team matchups, indexed by PokemonType::index()
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCoverage {
    /// Per defending type: member types hitting it super-effectively.
    pub offensive: [u32; 18],
    /// Per attacking type: members weak to it.
    pub weaknesses: [u32; 18],
    /// Per attacking type: members resisting it.
    pub resistances: [u32; 18],
    /// Per attacking type: members immune to it.
    pub immunities: [u32; 18],
}

impl TypeCoverage {
    pub fn offensive(&self, t: PokemonType) -> u32 {
        self.offensive[t.index()]
    }

    pub fn weaknesses(&self, t: PokemonType) -> u32 {
        self.weaknesses[t.index()]
    }

    pub fn resistances(&self, t: PokemonType) -> u32 {
        self.resistances[t.index()]
    }

    pub fn immunities(&self, t: PokemonType) -> u32 {
        self.immunities[t.index()]
    }

    /// Defending types with no super-effective answer on the team.
    pub fn uncovered(&self) -> Vec<PokemonType> {
        PokemonType::ALL
            .iter()
            .copied()
            .filter(|t| self.offensive(*t) == 0)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// TeamExport / SavedTeam
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMember {
    pub id: u32,
    pub name: String,
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamExport {
    pub team: Vec<ExportedMember>,
    pub synergy: u32,
    pub exported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTeam {
    pub id: String,
    pub name: String,
    pub members: Vec<TeamPokemon>,
    pub synergy: u32,
    pub saved_at: DateTime<Utc>,
}
