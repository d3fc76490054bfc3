use std::collections::BTreeMap;

use super::{base_name, DeckConfig};
use crate::models::{DeckEntry, ValidationResult};

/// Check a deck against its size and copy limits.
///
/// Errors make the deck unplayable; warnings flag questionable builds.
pub fn validate(entries: &[DeckEntry], config: &DeckConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let total: u32 = entries.iter().map(|e| e.count).sum();
    if total as usize != config.max_deck_size {
        errors.push(format!(
            "Deck must contain exactly {} cards (currently {})",
            config.max_deck_size, total
        ));
    }

    let mut by_name: BTreeMap<String, u32> = BTreeMap::new();
    for entry in entries {
        *by_name.entry(base_name(&entry.card)).or_default() += entry.count;
    }
    for (name, count) in &by_name {
        if *count > config.max_copies_per_card {
            errors.push(format!(
                "Too many copies of {}: {} (max {})",
                name, count, config.max_copies_per_card
            ));
        }
    }

    let pokemon: Vec<&DeckEntry> = entries
        .iter()
        .filter(|e| !e.card.is_trainer_like() && !e.card.is_energy())
        .collect();
    let pokemon_count: u32 = pokemon.iter().map(|e| e.count).sum();
    if total > 0 && pokemon_count == 0 {
        errors.push("Deck must contain at least one Pokémon".to_string());
    }

    let trainer_count: u32 = entries
        .iter()
        .filter(|e| e.card.is_trainer_like())
        .map(|e| e.count)
        .sum();
    if total > 0 && trainer_count * 2 > total {
        warnings.push(format!(
            "Deck is trainer-heavy ({} of {} cards are trainers)",
            trainer_count, total
        ));
    }

    let mut energy_types: Vec<String> = pokemon
        .iter()
        .map(|e| e.card.type_lower())
        .filter(|t| !t.is_empty() && t != "colorless")
        .collect();
    energy_types.sort();
    energy_types.dedup();
    if energy_types.len() > 2 {
        warnings.push(format!(
            "Deck uses {} energy types ({}); consider focusing on one or two",
            energy_types.len(),
            energy_types.join(", ")
        ));
    }

    if pokemon.len() == 1 && total as usize >= config.max_deck_size {
        warnings.push("Deck relies on a single Pokémon".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}
