//! Health checks over a compiled card registry.
//!
//! Compilation never rejects a card on these grounds; the checks only run
//! when explicitly asked for.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{CardRecord, Suit, frequency, slug};

/// A problem found in a compiled registry.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// More than one card shares an id.
    #[error("id '{id}' is used by {count} cards")]
    DuplicateId {
        /// The shared id.
        id: String,
        /// How many cards use it.
        count: usize,
    },

    /// More than one card shares a name.
    #[error("name '{name}' is used by {count} cards")]
    DuplicateName {
        /// The shared name.
        name: String,
        /// How many cards use it.
        count: usize,
    },

    /// A card's id is not the slug of its name.
    #[error("card '{name}' has id '{id}', expected '{expected}'")]
    IdMismatch {
        /// The card's name.
        name: String,
        /// The recorded id.
        id: String,
        /// The slug of the name.
        expected: String,
    },

    /// A card's suit disagrees with the classification of its name.
    #[error("card '{id}' has suit '{suit}', expected '{expected}'")]
    SuitMismatch {
        /// The card's id.
        id: String,
        /// The recorded suit.
        suit: Suit,
        /// The suit its name classifies as.
        expected: Suit,
    },

    /// A card's frequency is zero or negative.
    #[error("card '{id}' has non-positive frequency {freq}")]
    NonPositiveFrequency {
        /// The card's id.
        id: String,
        /// The recorded frequency.
        freq: f64,
    },

    /// A card's frequency is not one the compiler would infer.
    #[error("card '{id}' has unrecognised frequency {freq}")]
    UnknownFrequency {
        /// The card's id.
        id: String,
        /// The recorded frequency.
        freq: f64,
    },

    /// A list field contains a blank entry.
    #[error("card '{id}' has a blank entry in {field}")]
    BlankListEntry {
        /// The card's id.
        id: String,
        /// The serialized name of the list field.
        field: &'static str,
    },

    /// A list field contains the same entry twice.
    #[error("card '{id}' lists '{entry}' more than once in {field}")]
    DuplicateListEntry {
        /// The card's id.
        id: String,
        /// The serialized name of the list field.
        field: &'static str,
        /// The repeated entry.
        entry: String,
    },
}

/// Runs every check over `cards` and returns the issues found, grouped by
/// check and otherwise in card order.
#[must_use]
pub fn validate(cards: &[CardRecord]) -> Vec<Issue> {
    let mut issues = Vec::new();

    issues.extend(
        duplicates(cards.iter().map(|card| card.id.as_str()))
            .map(|(id, count)| Issue::DuplicateId { id, count }),
    );
    issues.extend(
        duplicates(cards.iter().map(|card| card.name.as_str()))
            .map(|(name, count)| Issue::DuplicateName { name, count }),
    );

    for card in cards {
        check_card(card, &mut issues);
    }

    issues
}

fn check_card(card: &CardRecord, issues: &mut Vec<Issue>) {
    let expected = slug(&card.name);
    if card.id != expected {
        issues.push(Issue::IdMismatch {
            name: card.name.clone(),
            id: card.id.clone(),
            expected,
        });
    }

    let expected = Suit::classify(&card.name);
    if card.suit != expected {
        issues.push(Issue::SuitMismatch {
            id: card.id.clone(),
            suit: card.suit,
            expected,
        });
    }

    if card.freq <= 0.0 {
        issues.push(Issue::NonPositiveFrequency {
            id: card.id.clone(),
            freq: card.freq,
        });
    } else if !frequency::is_known(card.freq) {
        issues.push(Issue::UnknownFrequency {
            id: card.id.clone(),
            freq: card.freq,
        });
    }

    check_list(card, "witchEyeOrders", &card.witch_eye_orders, issues);
    check_list(card, "nonLivingLineages", &card.non_living_lineages, issues);
}

fn check_list(
    card: &CardRecord,
    field: &'static str,
    entries: &[String],
    issues: &mut Vec<Issue>,
) {
    if entries.iter().any(|entry| entry.trim().is_empty()) {
        issues.push(Issue::BlankListEntry {
            id: card.id.clone(),
            field,
        });
    }

    issues.extend(
        duplicates(entries.iter().map(String::as_str)).map(|(entry, _)| {
            Issue::DuplicateListEntry {
                id: card.id.clone(),
                field,
                entry,
            }
        }),
    );
}

/// Values occurring more than once, with their counts, in order of first
/// appearance.
fn duplicates<'a>(
    values: impl Iterator<Item = &'a str> + Clone,
) -> impl Iterator<Item = (String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.clone() {
        *counts.entry(value).or_default() += 1;
    }

    let mut reported = BTreeSet::new();
    values.filter_map(move |value| {
        let count = counts[value];
        (count > 1 && reported.insert(value)).then(|| (value.to_string(), count))
    })
}
