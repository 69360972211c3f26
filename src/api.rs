//! # Public API
//!
//! [`ChordBook`] ties together an instrument table, search options and a
//! fingering cache: the state a chord chart viewer keeps between requests.
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretwise::{parse_chord_sequence, ChordBook};
//!
//! let mut book = ChordBook::new();
//!
//! for chord in parse_chord_sequence("C Am F G7") {
//!     let shapes = book.fingerings_for("ukulele", &chord)?;
//!     println!("{}: {}", chord.symbol, shapes.first().map(|f| f.to_string()).unwrap_or_default());
//! }
//! # Ok::<(), fretwise::FretError>(())
//! ```
//!
//! ## Retuning
//!
//! Retuning through the book clears that instrument's cached results, so the
//! next request searches again with the new tuning:
//!
//! ```rust
//! use fretwise::{parse_chord_token, ChordBook, PitchClass};
//!
//! let mut book = ChordBook::new();
//! let d = parse_chord_token("D")?;
//! let standard = book.fingerings_for("guitar", &d)?.to_vec();
//!
//! // Drop D
//! book.retune_string("guitar", 0, PitchClass::from_name("D")?)?;
//! let drop_d = book.fingerings_for("guitar", &d)?;
//! assert_ne!(standard, drop_d);
//! # Ok::<(), fretwise::FretError>(())
//! ```

use tracing::debug;

use crate::cache::FingeringCache;
use crate::chord::ChordDescriptor;
use crate::config::Config;
use crate::error::Result;
use crate::fingering::{search_with_stats, Fingering, SearchOptions};
use crate::instrument::{Instrument, InstrumentRegistry};
use crate::pitch::PitchClass;

/// Instruments, search options and cached results for one session
#[derive(Debug, Clone)]
pub struct ChordBook {
    instruments: InstrumentRegistry,
    options: SearchOptions,
    cache: FingeringCache,
}

impl Default for ChordBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordBook {
    /// Built-in instruments and default search options
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    pub fn from_config(config: Config) -> Self {
        ChordBook {
            instruments: config.instruments,
            options: config.search,
            cache: FingeringCache::new(),
        }
    }

    pub fn instruments(&self) -> &InstrumentRegistry {
        &self.instruments
    }

    pub fn instrument(&self, id: &str) -> Result<&Instrument> {
        self.instruments.get(id)
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn cache(&self) -> &FingeringCache {
        &self.cache
    }

    /// Change the search options. Cached results were ranked under the old
    /// options, so the whole cache is dropped.
    pub fn set_options(&mut self, options: SearchOptions) {
        if options != self.options {
            self.options = options;
            self.cache = FingeringCache::new();
        }
    }

    /// Ranked fingerings for `chord` on `instrument`, searching on a cache miss.
    pub fn fingerings_for(&mut self, instrument: &str, chord: &ChordDescriptor) -> Result<&[Fingering]> {
        if self.cache.lookup(instrument, &chord.symbol).is_some() {
            debug!(instrument, symbol = %chord.symbol, "cache hit");
            return Ok(self.cache.get(instrument, &chord.symbol));
        }
        let inst = self.instruments.get(instrument)?;
        let (fingerings, _) = search_with_stats(inst, &chord.required_notes, &self.options);
        Ok(self.cache.store(instrument, &chord.symbol, fingerings))
    }

    /// Retune one string and drop the instrument's cached results
    pub fn retune_string(&mut self, instrument: &str, index: usize, pitch: PitchClass) -> Result<()> {
        self.instruments.get_mut(instrument)?.set_string(index, pitch)?;
        self.cache.clear_instrument(instrument);
        Ok(())
    }

    /// Replace the whole tuning and drop the instrument's cached results
    pub fn retune(&mut self, instrument: &str, tuning: &[PitchClass]) -> Result<()> {
        self.instruments.get_mut(instrument)?.set_tuning(tuning)?;
        self.cache.clear_instrument(instrument);
        Ok(())
    }

    /// Restore the original tuning and drop the instrument's cached results
    pub fn reset_tuning(&mut self, instrument: &str) -> Result<()> {
        self.instruments.get_mut(instrument)?.reset_tuning();
        self.cache.clear_instrument(instrument);
        Ok(())
    }
}
