//! Keyword identification of scan descriptions
//!
//! Maps free text such as "crushed plastic bottle" onto a taxonomy key.
//! Rules are checked in order; the first rule with a matching keyword wins,
//! so more specific materials (battery, phone) are listed before the
//! generic ones they might also mention.

use crate::{WasteTaxonomy, WasteTypeProfile};
use tracing::debug;

/// (taxonomy key, keywords) in priority order
const KEYWORD_RULES: &[(&str, &[&str])] = &[
    ("battery", &["battery", "batteries"]),
    ("phone", &["phone", "smartphone"]),
    ("electronic", &["electronic", "device", "laptop", "computer", "charger"]),
    ("paint", &["paint"]),
    ("hazardous", &["hazardous", "chemical", "solvent", "pesticide"]),
    ("plastic", &["plastic"]),
    ("glass", &["glass"]),
    ("metal", &["aluminum", "aluminium", "can", "metal", "tin"]),
    ("paper", &["paper", "cardboard", "newspaper"]),
    ("food", &["food", "leftover"]),
    ("organic", &["organic", "yard", "leaves", "peel"]),
    ("clothing", &["clothing", "shirt", "shoes", "jacket"]),
    ("textile", &["textile", "fabric", "cloth"]),
];

/// Identify a taxonomy key from a free-text description
///
/// Matching is on whole words after lowercasing, so "cannot" does not
/// match "can". Returns `None` when no rule fires.
pub fn identify_key(description: &str) -> Option<&'static str> {
    let lowered = description.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| words.contains(k)))
        .map(|(key, _)| *key)
}

impl WasteTaxonomy {
    /// Resolve a free-text description to a profile, or General
    pub fn identify(&self, description: &str) -> &WasteTypeProfile {
        match identify_key(description) {
            Some(key) => {
                debug!("Identified {:?} as {}", description, key);
                self.classify(key)
            }
            None => self.general(),
        }
    }
}
