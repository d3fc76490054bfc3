//! Pokémon type-effectiveness chart.
//!
//! A single attack→defence table drives every calculation: a defender's
//! multiplier is the product of the attacking type's effectiveness against
//! each of its types. All functions here are pure and total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DextrendsError;

/// The 18 elemental types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

use PokemonType::*;

impl PokemonType {
    /// Every type, in chart order.
    pub const ALL: [PokemonType; 18] = [
        Normal, Fire, Water, Electric, Grass, Ice, Fighting, Poison, Ground, Flying, Psychic,
        Bug, Rock, Ghost, Dragon, Dark, Steel, Fairy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Normal => "normal",
            Fire => "fire",
            Water => "water",
            Electric => "electric",
            Grass => "grass",
            Ice => "ice",
            Fighting => "fighting",
            Poison => "poison",
            Ground => "ground",
            Flying => "flying",
            Psychic => "psychic",
            Bug => "bug",
            Rock => "rock",
            Ghost => "ghost",
            Dragon => "dragon",
            Dark => "dark",
            Steel => "steel",
            Fairy => "fairy",
        }
    }

    /// Position of this type in [`PokemonType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Non-neutral matchups for this type when attacking.
    fn attack_row(self) -> &'static [(PokemonType, f64)] {
        match self {
            Normal => &[(Rock, 0.5), (Ghost, 0.0), (Steel, 0.5)],
            Fire => &[
                (Fire, 0.5),
                (Water, 0.5),
                (Grass, 2.0),
                (Ice, 2.0),
                (Bug, 2.0),
                (Rock, 0.5),
                (Dragon, 0.5),
                (Steel, 2.0),
            ],
            Water => &[
                (Fire, 2.0),
                (Water, 0.5),
                (Grass, 0.5),
                (Ground, 2.0),
                (Rock, 2.0),
                (Dragon, 0.5),
            ],
            Electric => &[
                (Water, 2.0),
                (Electric, 0.5),
                (Grass, 0.5),
                (Ground, 0.0),
                (Flying, 2.0),
                (Dragon, 0.5),
            ],
            Grass => &[
                (Fire, 0.5),
                (Water, 2.0),
                (Grass, 0.5),
                (Poison, 0.5),
                (Ground, 2.0),
                (Flying, 0.5),
                (Bug, 0.5),
                (Rock, 2.0),
                (Dragon, 0.5),
                (Steel, 0.5),
            ],
            Ice => &[
                (Fire, 0.5),
                (Water, 0.5),
                (Grass, 2.0),
                (Ice, 0.5),
                (Ground, 2.0),
                (Flying, 2.0),
                (Dragon, 2.0),
                (Steel, 0.5),
            ],
            Fighting => &[
                (Normal, 2.0),
                (Ice, 2.0),
                (Poison, 0.5),
                (Flying, 0.5),
                (Psychic, 0.5),
                (Bug, 0.5),
                (Rock, 2.0),
                (Ghost, 0.0),
                (Dark, 2.0),
                (Steel, 2.0),
                (Fairy, 0.5),
            ],
            Poison => &[
                (Grass, 2.0),
                (Poison, 0.5),
                (Ground, 0.5),
                (Rock, 0.5),
                (Ghost, 0.5),
                (Steel, 0.0),
                (Fairy, 2.0),
            ],
            Ground => &[
                (Fire, 2.0),
                (Electric, 2.0),
                (Grass, 0.5),
                (Poison, 2.0),
                (Flying, 0.0),
                (Bug, 0.5),
                (Rock, 2.0),
                (Steel, 2.0),
            ],
            Flying => &[
                (Electric, 0.5),
                (Grass, 2.0),
                (Fighting, 2.0),
                (Bug, 2.0),
                (Rock, 0.5),
                (Steel, 0.5),
            ],
            Psychic => &[
                (Fighting, 2.0),
                (Poison, 2.0),
                (Psychic, 0.5),
                (Dark, 0.0),
                (Steel, 0.5),
            ],
            Bug => &[
                (Fire, 0.5),
                (Grass, 2.0),
                (Fighting, 0.5),
                (Poison, 0.5),
                (Flying, 0.5),
                (Psychic, 2.0),
                (Ghost, 0.5),
                (Dark, 2.0),
                (Steel, 0.5),
                (Fairy, 0.5),
            ],
            Rock => &[
                (Fire, 2.0),
                (Ice, 2.0),
                (Fighting, 0.5),
                (Ground, 0.5),
                (Flying, 2.0),
                (Bug, 2.0),
                (Steel, 0.5),
            ],
            Ghost => &[(Normal, 0.0), (Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5)],
            Dragon => &[(Dragon, 2.0), (Steel, 0.5), (Fairy, 0.0)],
            Dark => &[
                (Fighting, 0.5),
                (Psychic, 2.0),
                (Ghost, 2.0),
                (Dark, 0.5),
                (Fairy, 0.5),
            ],
            Steel => &[
                (Fire, 0.5),
                (Water, 0.5),
                (Electric, 0.5),
                (Ice, 2.0),
                (Rock, 2.0),
                (Steel, 0.5),
                (Fairy, 2.0),
            ],
            Fairy => &[
                (Fire, 0.5),
                (Fighting, 2.0),
                (Poison, 0.5),
                (Dragon, 2.0),
                (Dark, 2.0),
                (Steel, 0.5),
            ],
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PokemonType {
    type Err = DextrendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PokemonType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| DextrendsError::InvalidArgument(format!("Unknown type: {}", s)))
    }
}

/// Parse a list of type names, silently dropping names that are not one of
/// the 18 types (TCG-only types such as "colorless" or "trainer").
pub fn parse_types<S: AsRef<str>>(names: &[S]) -> Vec<PokemonType> {
    names
        .iter()
        .filter_map(|n| n.as_ref().parse().ok())
        .collect()
}

/// Damage multiplier of a single attacking type against a single defending type.
pub fn effectiveness(attack: PokemonType, defend: PokemonType) -> f64 {
    attack
        .attack_row()
        .iter()
        .find(|(t, _)| *t == defend)
        .map(|(_, m)| *m)
        .unwrap_or(1.0)
}

/// Damage multiplier against a (possibly dual-typed) defender.
///
/// An empty defender list yields `1.0`.
pub fn multiplier(attack: PokemonType, defenders: &[PokemonType]) -> f64 {
    defenders
        .iter()
        .map(|d| effectiveness(attack, *d))
        .product()
}

/// Types this attacking type hits for double damage.
pub fn super_effective_targets(attack: PokemonType) -> Vec<PokemonType> {
    attack
        .attack_row()
        .iter()
        .filter(|(_, m)| *m == 2.0)
        .map(|(t, _)| *t)
        .collect()
}

// ---------------------------------------------------------------------------
// DefensiveProfile
// ---------------------------------------------------------------------------

/// How a defender with the given types fares against every attacking type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefensiveProfile {
    multipliers: [f64; 18],
    pub weaknesses: Vec<PokemonType>,
    pub resistances: Vec<PokemonType>,
    pub immunities: Vec<PokemonType>,
}

impl DefensiveProfile {
    pub fn of(types: &[PokemonType]) -> Self {
        let mut multipliers = [1.0; 18];
        let mut weaknesses = Vec::new();
        let mut resistances = Vec::new();
        let mut immunities = Vec::new();

        for attack in PokemonType::ALL {
            let m = multiplier(attack, types);
            multipliers[attack.index()] = m;
            if m == 0.0 {
                immunities.push(attack);
            } else if m > 1.0 {
                weaknesses.push(attack);
            } else if m < 1.0 {
                resistances.push(attack);
            }
        }

        Self {
            multipliers,
            weaknesses,
            resistances,
            immunities,
        }
    }

    /// Multiplier taken from an attack of the given type.
    pub fn multiplier(&self, attack: PokemonType) -> f64 {
        self.multipliers[attack.index()]
    }

    /// Attacking types dealing 4× damage.
    pub fn double_weaknesses(&self) -> Vec<PokemonType> {
        self.weaknesses
            .iter()
            .copied()
            .filter(|t| self.multiplier(*t) >= 4.0)
            .collect()
    }
}
