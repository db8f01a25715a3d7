use std::fmt;

use serde::{Deserialize, Serialize};

/// The coarse category a card belongs to.
///
/// Suits are inferred from the card's name rather than declared in the
/// codex, so every name maps to exactly one suit. Names that carry none of
/// the minor-arcana keywords fall through to [`Suit::Majors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Cards whose name mentions wands.
    Wands,
    /// Cards whose name mentions cups.
    Cups,
    /// Cards whose name mentions pentacles or coins.
    Pentacles,
    /// Cards whose name mentions swords or blades.
    Swords,
    /// Everything else.
    Majors,
}

/// Keyword rules in priority order. The first rule with a keyword contained
/// in the lowercased name wins.
const RULES: &[(Suit, &[&str])] = &[
    (Suit::Wands, &["wands"]),
    (Suit::Cups, &["cups"]),
    (Suit::Pentacles, &["pentacles", "coin"]),
    (Suit::Swords, &["swords", "blade"]),
];

impl Suit {
    /// Classifies a card by case-insensitive substring match on its name.
    ///
    /// Rules are evaluated in a fixed order, so `"Cups of Wands"` is a wands
    /// card.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| name.contains(keyword)))
            .map_or(Self::Majors, |(suit, _)| *suit)
    }

    /// The serialized form of the suit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wands => "wands",
            Self::Cups => "cups",
            Self::Pentacles => "pentacles",
            Self::Swords => "swords",
            Self::Majors => "majors",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
