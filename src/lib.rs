pub mod api;
pub mod cache;
pub mod chord;
pub mod chord_parser;
pub mod config;
pub mod error;
pub mod fingering;
pub mod instrument;
pub mod pitch;

pub use api::ChordBook;
pub use cache::FingeringCache;
pub use chord::{chord_notes, ChordDescriptor, ChordQuality, ChordTones};
pub use chord_parser::{parse_chord_sequence, parse_chord_token};
pub use config::Config;
pub use error::{FretError, Result};
pub use fingering::{generate_fingerings, Barre, Fingering, FretChoice, SearchOptions};
pub use instrument::{Instrument, InstrumentRegistry};
pub use pitch::PitchClass;

/// Ranked fingerings for a single chord symbol on one of the built-in instruments.
///
/// Convenience for one-off lookups; use [`ChordBook`] to keep results cached
/// across requests or to work with custom tunings.
///
/// # Example
/// ```rust
/// let shapes = fretwise::fingerings("ukulele", "Am")?;
/// assert!(!shapes.is_empty());
/// # Ok::<(), fretwise::FretError>(())
/// ```
pub fn fingerings(instrument: &str, symbol: &str) -> Result<Vec<Fingering>> {
    let chord = parse_chord_token(symbol)?;
    let registry = InstrumentRegistry::builtin();
    let instrument = registry.get(instrument)?;
    Ok(generate_fingerings(
        instrument,
        &chord.required_notes,
        fingering::DEFAULT_MAX_FRET,
    ))
}
