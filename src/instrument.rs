//! # Instruments
//!
//! Fretted instruments and their tunings.
//!
//! An [`Instrument`] owns its current tuning (mutable) and a snapshot of the
//! tuning it was created with (immutable), used for reset and for reporting
//! which strings were changed. Strings are ordered from the lowest-index
//! string (nearest the player's thumb on a guitar, the 6th string) upwards.
//!
//! Changing a tuning does not touch any fingering cache. Callers holding a
//! [`FingeringCache`](crate::cache::FingeringCache) must clear the
//! instrument's entries themselves; [`ChordBook`](crate::api::ChordBook) does
//! this for its own cache.

use serde::Serialize;
use tracing::debug;

use crate::error::{FretError, Result};
use crate::pitch::PitchClass;

/// A fretted string instrument
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    id: String,
    name: String,
    icon: String,
    strings: Vec<PitchClass>,
    string_labels: Vec<String>,
    #[serde(skip)]
    original_tuning: Vec<PitchClass>,
    #[serde(skip)]
    tuning_version: u64,
}

impl Instrument {
    /// Create an instrument; the given tuning becomes its reset snapshot.
    ///
    /// Fails with [`FretError::ConfigError`] when there are no strings or the
    /// label count doesn't match the string count.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        strings: Vec<PitchClass>,
        string_labels: Vec<String>,
    ) -> Result<Self> {
        let id = id.into();
        if strings.is_empty() {
            return Err(FretError::ConfigError(format!(
                "instrument '{}' has no strings",
                id
            )));
        }
        if strings.len() != string_labels.len() {
            return Err(FretError::ConfigError(format!(
                "instrument '{}' has {} strings but {} string labels",
                id,
                strings.len(),
                string_labels.len()
            )));
        }
        Ok(Instrument {
            id,
            name: name.into(),
            icon: icon.into(),
            original_tuning: strings.clone(),
            strings,
            string_labels,
            tuning_version: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Current open-string pitch classes
    pub fn strings(&self) -> &[PitchClass] {
        &self.strings
    }

    pub fn string_labels(&self) -> &[String] {
        &self.string_labels
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Tuning the instrument was created with
    pub fn original_tuning(&self) -> &[PitchClass] {
        &self.original_tuning
    }

    /// Incremented on every tuning change
    pub fn tuning_version(&self) -> u64 {
        self.tuning_version
    }

    /// Retune one string.
    pub fn set_string(&mut self, index: usize, pitch: PitchClass) -> Result<()> {
        let count = self.strings.len();
        let slot = self
            .strings
            .get_mut(index)
            .ok_or_else(|| FretError::StringOutOfRange {
                instrument: self.id.clone(),
                index,
                count,
            })?;
        if *slot != pitch {
            *slot = pitch;
            self.tuning_version += 1;
            debug!(instrument = %self.id, index, %pitch, version = self.tuning_version, "string retuned");
        }
        Ok(())
    }

    /// Replace the whole tuning. The string count cannot change.
    pub fn set_tuning(&mut self, tuning: &[PitchClass]) -> Result<()> {
        if tuning.len() != self.strings.len() {
            return Err(FretError::StringOutOfRange {
                instrument: self.id.clone(),
                index: tuning.len(),
                count: self.strings.len(),
            });
        }
        if self.strings != tuning {
            self.strings = tuning.to_vec();
            self.tuning_version += 1;
            debug!(instrument = %self.id, version = self.tuning_version, "tuning replaced");
        }
        Ok(())
    }

    /// Restore the original tuning
    pub fn reset_tuning(&mut self) {
        if self.strings != self.original_tuning {
            self.strings = self.original_tuning.clone();
            self.tuning_version += 1;
            debug!(instrument = %self.id, version = self.tuning_version, "tuning reset");
        }
    }

    pub fn is_modified(&self) -> bool {
        self.strings != self.original_tuning
    }

    /// Indices of strings tuned away from the original tuning
    pub fn modified_strings(&self) -> Vec<usize> {
        self.strings
            .iter()
            .zip(&self.original_tuning)
            .enumerate()
            .filter(|(_, (now, orig))| now != orig)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Ordinal labels for `count` strings, highest number first ("4th", "3rd", "2nd", "1st")
pub fn ordinal_labels(count: usize) -> Vec<String> {
    (1..=count)
        .rev()
        .map(|n| {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{}{}", n, suffix)
        })
        .collect()
}

/// (id, name, icon, open strings as semitones above C)
const BUILTIN: [(&str, &str, &str, &[i32]); 4] = [
    ("guitar", "Guitar", "🎸", &[4, 9, 2, 7, 11, 4]), // E A D G B E
    ("charango", "Charango", "🪕", &[7, 0, 4, 9, 4]), // G C E A E
    ("ronroco", "Ronroco", "🎻", &[2, 7, 11, 4, 11]), // D G B E B
    ("ukulele", "Ukulele", "🎤", &[7, 0, 4, 9]),      // G C E A
];

/// The instruments available to a session, in display order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct InstrumentRegistry {
    instruments: Vec<Instrument>,
}

impl InstrumentRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Guitar, charango, ronroco and ukulele in their standard tunings
    pub fn builtin() -> Self {
        let instruments = BUILTIN
            .iter()
            .map(|(id, name, icon, semitones)| {
                let strings: Vec<PitchClass> =
                    semitones.iter().map(|s| PitchClass::new(*s)).collect();
                Instrument {
                    id: id.to_string(),
                    name: name.to_string(),
                    icon: icon.to_string(),
                    string_labels: ordinal_labels(strings.len()),
                    original_tuning: strings.clone(),
                    strings,
                    tuning_version: 0,
                }
            })
            .collect();
        InstrumentRegistry { instruments }
    }

    /// Add an instrument, replacing any existing one with the same id
    pub fn insert(&mut self, instrument: Instrument) {
        match self.instruments.iter_mut().find(|i| i.id == instrument.id) {
            Some(slot) => *slot = instrument,
            None => self.instruments.push(instrument),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Instrument> {
        self.instruments
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| FretError::UnknownInstrument(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Instrument> {
        self.instruments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| FretError::UnknownInstrument(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.instruments.iter().map(|i| i.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(names: &[&str]) -> Vec<PitchClass> {
        names.iter().map(|n| PitchClass::from_name(n).unwrap()).collect()
    }

    #[test]
    fn test_builtin_tunings() {
        let registry = InstrumentRegistry::builtin();
        assert_eq!(registry.ids(), vec!["guitar", "charango", "ronroco", "ukulele"]);
        assert_eq!(
            registry.get("guitar").unwrap().strings(),
            pcs(&["E", "A", "D", "G", "B", "E"]).as_slice()
        );
        assert_eq!(
            registry.get("charango").unwrap().strings(),
            pcs(&["G", "C", "E", "A", "E"]).as_slice()
        );
        assert_eq!(
            registry.get("ronroco").unwrap().strings(),
            pcs(&["D", "G", "B", "E", "B"]).as_slice()
        );
        let uke = registry.get("ukulele").unwrap();
        assert_eq!(uke.strings(), pcs(&["G", "C", "E", "A"]).as_slice());
        assert_eq!(uke.string_labels(), &["4th", "3rd", "2nd", "1st"]);
        for inst in registry.iter() {
            assert_eq!(inst.strings().len(), inst.string_labels().len());
            assert!(!inst.is_modified());
        }
    }

    #[test]
    fn test_unknown_instrument() {
        let registry = InstrumentRegistry::builtin();
        assert!(matches!(registry.get("banjo"), Err(FretError::UnknownInstrument(id)) if id == "banjo"));
    }

    #[test]
    fn test_retune_and_reset() {
        let mut registry = InstrumentRegistry::builtin();
        let guitar = registry.get_mut("guitar").unwrap();
        let d = PitchClass::from_name("D").unwrap();

        guitar.set_string(0, d).unwrap();
        assert_eq!(guitar.tuning_version(), 1);
        assert!(guitar.is_modified());
        assert_eq!(guitar.modified_strings(), vec![0]);
        assert_eq!(guitar.original_tuning()[0].name(), "E");

        // Same pitch again is not a change
        guitar.set_string(0, d).unwrap();
        assert_eq!(guitar.tuning_version(), 1);

        guitar.reset_tuning();
        assert_eq!(guitar.tuning_version(), 2);
        assert!(!guitar.is_modified());
        assert!(guitar.modified_strings().is_empty());
    }

    #[test]
    fn test_set_string_out_of_range() {
        let mut registry = InstrumentRegistry::builtin();
        let uke = registry.get_mut("ukulele").unwrap();
        let err = uke.set_string(4, PitchClass::new(0)).unwrap_err();
        assert!(matches!(err, FretError::StringOutOfRange { index: 4, count: 4, .. }));
    }

    #[test]
    fn test_set_tuning_length_must_match() {
        let mut registry = InstrumentRegistry::builtin();
        let guitar = registry.get_mut("guitar").unwrap();
        assert!(guitar.set_tuning(&pcs(&["D", "A", "D"])).is_err());
        guitar.set_tuning(&pcs(&["D", "A", "D", "G", "A", "D"])).unwrap();
        assert_eq!(guitar.modified_strings(), vec![0, 4, 5]);
    }

    #[test]
    fn test_new_validates_labels() {
        assert!(Instrument::new("x", "X", "", pcs(&["E", "A"]), vec!["a".into()]).is_err());
        assert!(Instrument::new("x", "X", "", vec![], vec![]).is_err());
        let inst = Instrument::new("x", "X", "", pcs(&["E", "A"]), ordinal_labels(2)).unwrap();
        assert_eq!(inst.original_tuning(), inst.strings());
    }

    #[test]
    fn test_ordinal_labels() {
        assert_eq!(ordinal_labels(6), vec!["6th", "5th", "4th", "3rd", "2nd", "1st"]);
        assert_eq!(ordinal_labels(12)[0], "12th");
        assert_eq!(ordinal_labels(12)[10], "2nd");
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let mut registry = InstrumentRegistry::builtin();
        let drop_d = Instrument::new(
            "guitar",
            "Drop D guitar",
            "",
            pcs(&["D", "A", "D", "G", "B", "E"]),
            ordinal_labels(6),
        )
        .unwrap();
        registry.insert(drop_d);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("guitar").unwrap().name(), "Drop D guitar");
    }
}
