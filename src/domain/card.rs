use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::Suit;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("this must never fail"));

/// One entry in the card registry.
///
/// Field order is the serialization order. Absent text fields are empty
/// strings and absent lists are empty, so every key is always present in the
/// JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Slug derived from [`name`](Self::name), see [`slug`].
    pub id: String,
    /// The heading text of the card's block.
    pub name: String,
    /// Category inferred from the name.
    pub suit: Suit,
    /// The `Letter` field.
    pub letter: String,
    /// The `Astrology` field.
    pub astrology: String,
    /// The `Ray` field.
    pub ray: String,
    /// Left-hand side of the `Angel/Demon` pair.
    pub angel: String,
    /// Right-hand side of the `Angel/Demon` pair.
    pub demon: String,
    /// The `Deities` field.
    pub deities: String,
    /// The crystal name, without its chemistry.
    pub crystal: String,
    /// The parenthesized chemistry of the `Crystal` field.
    pub chemistry: String,
    /// The `Artifact` field.
    pub artifact: String,
    /// The `Pigment` field.
    pub pigment: String,
    /// The `Secret Tara` field.
    pub tara: String,
    /// The `Thought-form` field.
    pub thought: String,
    /// The `HGA Fragment` field.
    pub hga_fragment: String,
    /// The `Pattern Glyph` field.
    pub pattern_glyph: String,
    /// The `Psyche` field.
    pub psyche: String,
    /// The `Technical` field.
    pub technical: String,
    /// The `App Pulls` field. Never empty for a compiled card.
    #[serde(rename = "appPulls")]
    pub app_pulls: String,
    /// Frequency in Hz.
    pub freq: f64,
    /// Entries of the `Witch Eye Order` field.
    #[serde(rename = "witchEyeOrders")]
    pub witch_eye_orders: Vec<String>,
    /// Entries of the `Non-Living Lineage` field.
    #[serde(rename = "nonLivingLineages")]
    pub non_living_lineages: Vec<String>,
}

/// Derives a card id from its name.
///
/// Every run of non-word characters becomes a single `_` and the result is
/// lowercased. Word characters are Unicode-aware, so letters outside ASCII
/// survive.
///
/// ```
/// assert_eq!(codex_registry::domain::slug("XIX — The Sun"), "xix_the_sun");
/// ```
#[must_use]
pub fn slug(name: &str) -> String {
    NON_WORD.replace_all(name, "_").to_lowercase()
}

/// An `Angel/Demon` field split on the `↔` separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    /// Text before the first separator.
    pub angel: String,
    /// Text between the first separator and the next one, if any.
    pub demon: String,
}

impl Pairing {
    /// The glyph separating the two halves.
    pub const SEPARATOR: char = '↔';

    /// Splits the raw field value.
    ///
    /// Without a separator both halves are empty, whatever the field holds.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if !value.contains(Self::SEPARATOR) {
            return Self::default();
        }
        let mut parts = value.split(Self::SEPARATOR).map(str::trim);
        Self {
            angel: parts.next().unwrap_or_default().to_string(),
            demon: parts.next().unwrap_or_default().to_string(),
        }
    }
}

/// A `Crystal` field decomposed into its name and chemistry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mineral {
    /// Text before the parenthesized group.
    pub crystal: String,
    /// Text between the first `(` and the last `)`.
    pub chemistry: String,
}

impl Mineral {
    /// Decomposes the raw field value.
    ///
    /// The group spans from the first `(` to the last `)`, so nested
    /// parentheses stay in the chemistry. When there is no well-formed group
    /// the whole trimmed value is the crystal.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let group = value
            .find('(')
            .zip(value.rfind(')'))
            .filter(|(open, close)| open < close);

        match group {
            Some((open, close)) => Self {
                crystal: value[..open].trim().to_string(),
                chemistry: value[open + 1..close].trim().to_string(),
            },
            None => Self {
                crystal: value.trim().to_string(),
                chemistry: String::new(),
            },
        }
    }
}
