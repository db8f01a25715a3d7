//! Mapping from ray descriptions to solfeggio frequencies.

/// The frequency used when a ray description matches no keyword.
pub const DEFAULT_FREQUENCY: u32 = 432;

/// Every frequency [`map_freq`] can produce, in ascending order.
pub const KNOWN_FREQUENCIES: [u32; 6] = [285, 417, 432, 528, 852, 963];

/// Keyword rules in priority order.
///
/// Rule order decides the winner, not the position of a keyword within the
/// description.
const RULES: &[(u32, &[&str])] = &[
    (963, &["violet"]),
    (852, &["indigo", "silver"]),
    (528, &["gold", "emerald", "green", "aquamarine", "turquoise"]),
    (417, &["crimson"]),
    (285, &["scarlet", "red"]),
];

/// Maps a ray description to a frequency in Hz.
///
/// Matching is a case-insensitive substring search. A missing or empty
/// description yields [`DEFAULT_FREQUENCY`].
#[must_use]
pub fn map_freq(ray: Option<&str>) -> u32 {
    let ray = ray.unwrap_or_default().to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| ray.contains(keyword)))
        .map_or(DEFAULT_FREQUENCY, |(frequency, _)| *frequency)
}

/// Whether `freq` is one of the [`KNOWN_FREQUENCIES`].
#[must_use]
pub fn is_known(freq: f64) -> bool {
    KNOWN_FREQUENCIES
        .iter()
        .any(|known| (f64::from(*known) - freq).abs() < f64::EPSILON)
}
