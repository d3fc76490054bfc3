//! Compact share codes and JSON deck files.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DeckBuilder;
use crate::error::{DextrendsError, Result};
use crate::models::{DeckEntry, ImportOutcome, PocketCard};

// ---------------------------------------------------------------------------
// Share codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareCard {
    pub i: String,
    #[serde(default)]
    pub c: u32,
}

/// Payload carried by a share code: `{"n": name, "c": [{"i": id, "c": count}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub c: Vec<ShareCard>,
}

/// Decode a share code produced by [`DeckBuilder::share_code`].
///
/// Accepts both the standard and URL-safe base64 alphabets.
pub fn decode_share_code(code: &str) -> Result<SharePayload> {
    let code = code.trim();
    let bytes = STANDARD
        .decode(code)
        .or_else(|_| URL_SAFE.decode(code))
        .map_err(|e| DextrendsError::ShareCode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| DextrendsError::ShareCode(e.to_string()))
}

// ---------------------------------------------------------------------------
// JSON deck file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckFileCard {
    id: String,
    name: String,
    count: u32,
    #[serde(rename = "type")]
    type_field: Option<String>,
    pack: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckFile {
    name: String,
    format: String,
    total_cards: u32,
    cards: Vec<DeckFileCard>,
}

/// Copies requested by a JSON card item: missing or zero means one.
fn requested_count(item: &Value, key: &str) -> u32 {
    match item.get(key).and_then(Value::as_u64) {
        Some(0) | None => 1,
        Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
    }
}

impl DeckBuilder {
    /// Encode the deck as a base64 share code.
    pub fn share_code(&self) -> Result<String> {
        let payload = SharePayload {
            n: Some(self.name().to_string()),
            c: self
                .entries()
                .iter()
                .map(|e| ShareCard {
                    i: e.card.id.clone(),
                    c: e.count,
                })
                .collect(),
        };
        Ok(STANDARD.encode(serde_json::to_vec(&payload)?))
    }

    /// Deck builder URL carrying the share code, e.g.
    /// `https://example.com/pocketmode/deckbuilder?d=eyJuIj...`.
    pub fn share_url(&self, origin: &str) -> Result<String> {
        Ok(format!(
            "{}/pocketmode/deckbuilder?d={}",
            origin.trim_end_matches('/'),
            self.share_code()?
        ))
    }

    /// Replace the deck with the contents of a share code.
    ///
    /// Card ids not present in `available` are skipped silently.
    pub fn import_share_code(&mut self, code: &str, available: &[PocketCard]) -> ImportOutcome {
        let payload = match decode_share_code(code) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "share code rejected");
                return ImportOutcome::failed("Invalid share link");
            }
        };

        if let Some(name) = payload.n.as_deref().filter(|n| !n.is_empty()) {
            self.set_name(name);
        }

        let mut parsed: Vec<DeckEntry> = Vec::new();
        for item in &payload.c {
            if let Some(card) = available.iter().find(|c| c.id == item.i) {
                self.merge_parsed(&mut parsed, card, item.c.max(1));
            }
        }

        self.finish_import(parsed, Vec::new(), "No valid cards found in shared deck")
    }

    /// Render the deck as a pretty-printed JSON deck file.
    pub fn export_json(&self) -> Result<String> {
        let file = DeckFile {
            name: self.name().to_string(),
            format: self.format().as_str().to_string(),
            total_cards: self.total_cards(),
            cards: self
                .entries()
                .iter()
                .map(|e| DeckFileCard {
                    id: e.card.id.clone(),
                    name: e.card.name.clone(),
                    count: e.count,
                    type_field: e.card.type_field.clone(),
                    pack: e.card.pack.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Replace the deck with the contents of a JSON deck file.
    ///
    /// Cards are matched by id first, then by exact name.
    pub fn import_json(&mut self, json: &str, available: &[PocketCard]) -> ImportOutcome {
        let data: Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(_) => return ImportOutcome::failed("Invalid JSON format"),
        };

        if let Some(name) = data.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) {
            self.set_name(name);
        }

        let Some(items) = data.get("cards").and_then(Value::as_array) else {
            return ImportOutcome::failed("Invalid JSON format: missing cards array");
        };

        let mut parsed: Vec<DeckEntry> = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        for item in items {
            let id = item.get("id").and_then(Value::as_str);
            let name = item.get("name").and_then(Value::as_str);
            let card = available
                .iter()
                .find(|c| Some(c.id.as_str()) == id)
                .or_else(|| available.iter().find(|c| Some(c.name.as_str()) == name));

            match card {
                Some(card) => self.merge_parsed(&mut parsed, card, requested_count(item, "count")),
                None => errors.push(format!(
                    "Card not found: {}",
                    name.or(id).unwrap_or("unknown")
                )),
            }
        }

        self.finish_import(parsed, errors, "No valid cards found")
    }
}
