//! # Fingering Module
//!
//! Find playable fingerings for a chord on a fretted instrument and rank them.
//!
//! ## Pipeline
//! 1. **Search** - every string offers open / frets `1..=max_fret` / muted,
//!    keeping only choices that sound a chord tone; all combinations are tried
//! 2. **Validity** - every chord tone sounds and at least three strings play
//! 3. **Assignment** - decide on a barre and number the fingers
//! 4. **Playability** - reject shapes a hand can't make
//! 5. **Ranking** - score, stable sort best first, keep the top six
//!
//! ## Sub-modules
//! - `types` - FretChoice, Barre, Fingering, SearchStats, SearchOptions
//! - `search` - Candidate enumeration and the validity filter
//! - `assign` - Barre detection and finger numbering
//! - `playability` - Hand-shape checks
//! - `score` - Scoring and top-K selection
//!
//! ## Entry Points
//! - [`generate_fingerings()`] - Ranked fingerings for a chord
//! - [`search_with_stats()`] - Same, plus how many candidates each filter dropped
//!
//! ## Example
//! ```rust
//! use fretwise::fingering::generate_fingerings;
//! use fretwise::{parse_chord_token, InstrumentRegistry};
//!
//! let registry = InstrumentRegistry::builtin();
//! let guitar = registry.get("guitar").unwrap();
//! let chord = parse_chord_token("C").unwrap();
//!
//! let fingerings = generate_fingerings(guitar, &chord.required_notes, 5);
//! assert!(!fingerings.is_empty());
//! assert!(fingerings.len() <= 6);
//! ```
//!
//! ## String Order
//! Frets, fingers and barre ranges are indexed by the instrument's string
//! order. Index 0 is the first string of the tuning (low E on a guitar), and
//! muted strings may only appear at the start of that order.
//!
//! ## Related Modules
//! - `chord` - Supplies the `ChordTones` to search for
//! - `instrument` - Supplies the tuning
//! - `cache` - Stores ranked results per instrument and chord

mod assign;
mod playability;
mod score;
mod search;
mod types;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::chord::ChordTones;
use crate::instrument::Instrument;

pub use assign::{assign_fingers, find_barre, process_fingering, AssignmentFailure};
pub use playability::is_playable;
pub use score::{rank, score_fingering};
pub use search::{enumerate, is_valid, Combinations};
pub use types::{
    Barre, Finger, Fingering, FretChoice, RawFingering, SearchOptions, SearchStats,
    DEFAULT_LIMIT, DEFAULT_MAX_FRET,
};

/// Ranked fingerings for `tones` on `instrument`, best first, at most six.
///
/// Deterministic: the same tuning and inputs always give the same list. An
/// empty list means nothing playable exists within `max_fret`.
pub fn generate_fingerings(instrument: &Instrument, tones: &ChordTones, max_fret: u8) -> Vec<Fingering> {
    let options = SearchOptions {
        max_fret,
        ..SearchOptions::default()
    };
    search_with_stats(instrument, tones, &options).0
}

/// Run the full pipeline and report how many candidates each stage removed.
pub fn search_with_stats(
    instrument: &Instrument,
    tones: &ChordTones,
    options: &SearchOptions,
) -> (Vec<Fingering>, SearchStats) {
    let tuning = instrument.strings();
    let mut stats = SearchStats::default();
    let mut playable = Vec::new();

    for frets in enumerate(tuning, tones, options.max_fret) {
        stats.generated += 1;
        if !is_valid(&frets, tuning, tones) {
            stats.rejected_by_validity += 1;
            continue;
        }
        match process_fingering(&frets) {
            Some(fingering) if is_playable(&fingering) => playable.push(fingering),
            _ => stats.rejected_by_playability += 1,
        }
    }
    stats.playable = playable.len();

    let ranked = rank(playable, tuning, tones, options.limit);
    debug!(
        instrument = instrument.id(),
        max_fret = options.max_fret,
        generated = stats.generated,
        rejected_by_validity = stats.rejected_by_validity,
        rejected_by_playability = stats.rejected_by_playability,
        playable = stats.playable,
        returned = ranked.len(),
        "fingering search finished"
    );
    (ranked, stats)
}
