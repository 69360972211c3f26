//! Memoized fingering results keyed by instrument and chord symbol.
//!
//! Entries never expire on their own. When an instrument is retuned its
//! entries are stale and must be dropped with
//! [`FingeringCache::clear_instrument`].

use std::collections::HashMap;
use tracing::debug;

use crate::fingering::Fingering;

/// Per instrument id, per chord symbol
#[derive(Debug, Clone, Default)]
pub struct FingeringCache {
    entries: HashMap<String, HashMap<String, Vec<Fingering>>>,
}

impl FingeringCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the ranked fingerings for `symbol` on `instrument`, replacing any
    /// previous entry, and return the stored list
    pub fn store(&mut self, instrument: &str, symbol: &str, fingerings: Vec<Fingering>) -> &[Fingering] {
        debug!(instrument, symbol, count = fingerings.len(), "caching fingerings");
        let by_symbol = self.entries.entry(instrument.to_string()).or_default();
        by_symbol.insert(symbol.to_string(), fingerings);
        by_symbol.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stored fingerings, or an empty slice when nothing is cached
    pub fn get(&self, instrument: &str, symbol: &str) -> &[Fingering] {
        self.lookup(instrument, symbol).unwrap_or(&[])
    }

    /// Stored fingerings, telling a cached empty result apart from a miss
    pub fn lookup(&self, instrument: &str, symbol: &str) -> Option<&[Fingering]> {
        self.entries
            .get(instrument)?
            .get(symbol)
            .map(Vec::as_slice)
    }

    /// Drop every entry for `instrument`; returns how many were removed
    pub fn clear_instrument(&mut self, instrument: &str) -> usize {
        let removed = self.entries.remove(instrument).map_or(0, |by_symbol| by_symbol.len());
        debug!(instrument, removed, "cleared instrument cache");
        removed
    }

    /// Number of cached (instrument, symbol) entries
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
