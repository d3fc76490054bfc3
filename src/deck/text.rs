//! Plain-text deck lists.
//!
//! Export format:
//!
//! ```text
//! Deck Name: Lightning Rush
//! Total Cards: 20
//!
//! 2x Pikachu ex
//! 2x Professor's Research
//! ```
//!
//! Import accepts `2x Name`, `2 Name`, `Name x2` and a bare `Name`
//! (one copy). Header lines are only recognised before the first card line.

use regex::Regex;
use std::sync::OnceLock;

use super::DeckBuilder;
use crate::models::{DeckEntry, ImportOutcome, PocketCard};

/// A card line split into name and requested count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub name: String,
    pub count: u32,
}

fn line_patterns() -> &'static [(Regex, bool); 2] {
    static PATTERNS: OnceLock<[(Regex, bool); 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // 2x Card Name / 2 Card Name
            (
                Regex::new(r"(?i)^(\d+)x?\s+(.+)$").expect("count-first pattern is valid"),
                true,
            ),
            // Card Name x2
            (
                Regex::new(r"(?i)^(.+?)\s*x\s*(\d+)$").expect("count-last pattern is valid"),
                false,
            ),
        ]
    })
}

/// A parsed line plus the count digits exactly as written.
struct Candidate {
    line: ParsedLine,
    raw_count: String,
}

/// Every interpretation of a line as `count + name`, in pattern order.
///
/// Counts too large for `u32` saturate so they are reported as invalid
/// rather than dropped.
fn interpretations(line: &str) -> Vec<Candidate> {
    line_patterns()
        .iter()
        .filter_map(|(re, count_first)| {
            let caps = re.captures(line)?;
            let (count, name) = if *count_first {
                (&caps[1], &caps[2])
            } else {
                (&caps[2], &caps[1])
            };
            Some(Candidate {
                line: ParsedLine {
                    name: name.trim().to_string(),
                    count: count.parse().unwrap_or(u32::MAX),
                },
                raw_count: count.to_string(),
            })
        })
        .collect()
}

/// Parse a single deck-list line, preferring the count-first form.
///
/// Returns `None` for lines that carry no explicit count.
pub fn parse_deck_line(line: &str) -> Option<ParsedLine> {
    interpretations(line.trim()).into_iter().next().map(|c| c.line)
}

fn normalize_quotes(s: &str) -> String {
    s.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

/// Case-insensitive name lookup that also treats curly apostrophes as straight.
fn find_by_name<'c>(cards: &'c [PocketCard], name: &str) -> Option<&'c PocketCard> {
    let lower = name.to_lowercase();
    let normalized = normalize_quotes(name);
    cards
        .iter()
        .find(|c| c.name.to_lowercase() == lower || normalize_quotes(&c.name) == normalized)
}

impl DeckBuilder {
    /// Render the deck as a text list. An empty deck renders as `""`.
    pub fn export_text(&self) -> String {
        if self.entries().is_empty() {
            return String::new();
        }
        let mut lines = vec![
            format!("Deck Name: {}", self.name()),
            format!("Total Cards: {}", self.total_cards()),
            String::new(),
        ];
        lines.extend(
            self.entries()
                .iter()
                .map(|e| format!("{}x {}", e.count, e.card.name)),
        );
        lines.join("\n")
    }

    /// Replace the deck with cards parsed from a text list.
    ///
    /// Lines naming unknown cards or carrying an out-of-range count are
    /// reported in `errors` and skipped. Duplicate lines merge up to the copy
    /// limit and the result is truncated to the deck size. A `Deck Name:`
    /// header renames the deck.
    pub fn import_text(&mut self, text: &str, available: &[PocketCard]) -> ImportOutcome {
        let max_copies = self.config().max_copies_per_card;
        let mut parsed: Vec<DeckEntry> = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        let mut in_header = true;
        let mut header_name: Option<String> = None;

        for line in text.trim().lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if in_header {
                if let Some(name) = line.strip_prefix("Deck Name:") {
                    header_name = Some(name.trim().to_string());
                    continue;
                }
                if line.starts_with("Total Cards:") {
                    continue;
                }
            }
            in_header = false;

            let mut matched = false;
            for Candidate { line: candidate, raw_count } in interpretations(line) {
                if candidate.count < 1 || candidate.count > max_copies {
                    errors.push(format!(
                        "Invalid count for \"{}\": {}",
                        candidate.name, raw_count
                    ));
                    continue;
                }

                match find_by_name(available, &candidate.name) {
                    Some(card) => self.merge_parsed(&mut parsed, card, candidate.count),
                    None => errors.push(format!("Card not found: \"{}\"", candidate.name)),
                }
                matched = true;
                break;
            }

            if !matched {
                let lower = line.to_lowercase();
                if let Some(card) = available.iter().find(|c| c.name.to_lowercase() == lower) {
                    self.merge_parsed(&mut parsed, card, 1);
                }
            }
        }

        let outcome = self.finish_import(parsed, errors, "No valid cards found");
        if outcome.success {
            if let Some(name) = header_name.filter(|n| !n.is_empty()) {
                self.set_name(&name);
            }
        }
        outcome
    }
}
