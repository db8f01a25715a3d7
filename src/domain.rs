//! Domain models for the card registry.
//!
//! This module contains the card record and the rules that derive its
//! inferred attributes (suit, frequency, id), along with configuration and
//! registry health checks.

/// Card records and the decomposition of composite fields.
pub mod card;
pub use card::{CardRecord, Mineral, Pairing, slug};

mod config;
pub use config::{Config, ConfigError};

pub mod frequency;
pub use frequency::map_freq;

mod suit;
pub use suit::Suit;

pub mod validation;
pub use validation::{Issue, validate};
