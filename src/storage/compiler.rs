//! Compilation of a markdown codex into card records.

use std::{
    num::ParseFloatError,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::{debug, info, instrument, trace};

use crate::{
    domain::{CardRecord, Mineral, Pairing, Suit, map_freq, slug},
    storage::{
        Registry, WriteError,
        markdown::{field, heading, parse_list, split_blocks},
    },
};

static SOLFEGGIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Solfeggio\s*=\s*([0-9.]+)").expect("this must never fail"));

/// The outcome of compiling a codex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
    registry: Registry,
    skipped: usize,
}

impl Compilation {
    /// The compiled cards.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The number of blocks that produced no card.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Compiles a codex into card records.
///
/// Blocks without a heading or without an `App Pulls` value produce no card.
/// Card order follows block order.
///
/// # Errors
///
/// Returns an error if a card's `Technical` field holds a `Solfeggio` marker
/// whose value is not a finite number.
#[instrument(level = "debug", skip(markdown))]
pub fn compile_markdown(markdown: &str) -> Result<Compilation, CompileError> {
    let mut cards = Vec::new();
    let mut skipped = 0;

    for block in split_blocks(markdown) {
        match assemble(block)? {
            Some(card) => {
                trace!(id = %card.id, suit = %card.suit, freq = card.freq, "assembled card");
                cards.push(card);
            }
            None => skipped += 1,
        }
    }

    Ok(Compilation {
        registry: Registry::new(cards),
        skipped,
    })
}

/// Assembles the card described by a single block.
///
/// Returns `None` when the block has no heading or no `App Pulls` value.
///
/// # Errors
///
/// Returns an error if the block's `Technical` field holds a `Solfeggio`
/// marker whose value is not a finite number.
pub fn assemble(block: &str) -> Result<Option<CardRecord>, CompileError> {
    let Some(name) = heading(block) else {
        debug!("skipping block without a heading");
        return Ok(None);
    };

    let app_pulls = field(block, "App Pulls");
    if app_pulls.is_empty() {
        debug!(name, "skipping block without App Pulls");
        return Ok(None);
    }

    let ray = field(block, "Ray");
    let technical = field(block, "Technical");
    let Pairing { angel, demon } = Pairing::parse(field(block, "Angel/Demon"));
    let Mineral { crystal, chemistry } = Mineral::parse(field(block, "Crystal"));

    let freq = match solfeggio(technical) {
        Some(value) => parse_frequency(name, value)?,
        None => f64::from(map_freq(Some(ray))),
    };

    Ok(Some(CardRecord {
        id: slug(name),
        name: name.to_string(),
        suit: Suit::classify(name),
        letter: field(block, "Letter").to_string(),
        astrology: field(block, "Astrology").to_string(),
        ray: ray.to_string(),
        angel,
        demon,
        deities: field(block, "Deities").to_string(),
        crystal,
        chemistry,
        artifact: field(block, "Artifact").to_string(),
        pigment: field(block, "Pigment").to_string(),
        tara: field(block, "Secret Tara").to_string(),
        thought: field(block, "Thought-form").to_string(),
        hga_fragment: field(block, "HGA Fragment").to_string(),
        pattern_glyph: field(block, "Pattern Glyph").to_string(),
        psyche: field(block, "Psyche").to_string(),
        technical: technical.to_string(),
        app_pulls: app_pulls.to_string(),
        freq,
        witch_eye_orders: parse_list(Some(field(block, "Witch Eye Order"))),
        non_living_lineages: parse_list(Some(field(block, "Non-Living Lineage"))),
    }))
}

/// The raw value of an explicit `Solfeggio = N` marker, if any.
fn solfeggio(technical: &str) -> Option<&str> {
    SOLFEGGIO
        .captures(technical)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
}

fn parse_frequency(card: &str, value: &str) -> Result<f64, CompileError> {
    let freq = value
        .parse::<f64>()
        .map_err(|source| CompileError::Frequency {
            card: card.to_string(),
            value: value.to_string(),
            source,
        })?;

    // Digit runs past f64::MAX parse as infinity, which JSON cannot hold.
    if freq.is_finite() {
        Ok(freq)
    } else {
        Err(CompileError::FrequencyOutOfRange {
            card: card.to_string(),
            value: value.to_string(),
        })
    }
}

/// Reads the codex at `input`, compiles it, and writes the registry to
/// `output`.
///
/// The output file is replaced, never merged, and its parent directories are
/// created if needed.
///
/// # Errors
///
/// Returns an error if the input cannot be read, if compilation fails, or if
/// the registry cannot be written.
#[instrument(level = "debug")]
pub fn compile(input: &Path, output: &Path) -> Result<Compilation, CompileError> {
    let markdown = std::fs::read_to_string(input).map_err(|source| CompileError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let compilation = compile_markdown(&markdown)?;
    compilation.registry().save(output)?;

    info!(
        cards = compilation.registry().len(),
        skipped = compilation.skipped(),
        output = %output.display(),
        "compiled registry"
    );

    Ok(compilation)
}

/// Errors that can occur when compiling a codex.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The codex could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// The codex path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A `Solfeggio` marker holds something other than a number.
    #[error("card '{card}' has an invalid Solfeggio value '{value}'")]
    Frequency {
        /// The name of the offending card.
        card: String,
        /// The captured value.
        value: String,
        /// The parse failure.
        source: ParseFloatError,
    },

    /// A `Solfeggio` marker holds a number too large to represent.
    #[error("card '{card}' has an out-of-range Solfeggio value '{value}'")]
    FrequencyOutOfRange {
        /// The name of the offending card.
        card: String,
        /// The captured value.
        value: String,
    },

    /// The registry could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}
