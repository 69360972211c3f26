//! # Configuration
//!
//! Instrument tables and search defaults read from YAML.
//!
//! ## Format
//! ```yaml
//! max-fret: 7
//! replace-builtin: false
//! instruments:
//!   - id: mandolin
//!     name: Mandolin
//!     icon: "🎵"
//!     strings: [G, D, A, E]
//!     string-labels: ["4th", "3rd", "2nd", "1st"]
//! ```
//!
//! Every key is optional. Instruments are merged into the built-in table by
//! id (same id replaces, new ids are appended) unless `replace-builtin` is
//! set, in which case only the listed instruments exist. Omitted
//! `string-labels` default to ordinal names, an omitted `name` to the id.
//!
//! ## Example
//! ```rust
//! use fretwise::Config;
//!
//! let config = Config::from_yaml("max-fret: 7").unwrap();
//! assert_eq!(config.search.max_fret, 7);
//! assert!(config.instruments.get("guitar").is_ok());
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{FretError, Result};
use crate::fingering::SearchOptions;
use crate::instrument::{ordinal_labels, Instrument, InstrumentRegistry};
use crate::pitch::PitchClass;

/// Highest `max-fret` a configuration may ask for
pub const MAX_CONFIGURABLE_FRET: u8 = 24;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    pub max_fret: Option<u8>,
    #[serde(default)]
    pub replace_builtin: bool,
    #[serde(default)]
    pub instruments: Vec<RawInstrument>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct RawInstrument {
    pub id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub strings: Vec<String>,
    pub string_labels: Option<Vec<String>>,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub search: SearchOptions,
    pub instruments: InstrumentRegistry,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search: SearchOptions::default(),
            instruments: InstrumentRegistry::builtin(),
        }
    }
}

impl Config {
    /// Parse and validate YAML configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| FretError::ConfigError(e.to_string()))?
        };
        Self::from_raw(raw)
    }

    /// Read and validate a YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_yaml(&content)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let mut search = SearchOptions::default();
        if let Some(max_fret) = raw.max_fret {
            if !(1..=MAX_CONFIGURABLE_FRET).contains(&max_fret) {
                return Err(FretError::ConfigError(format!(
                    "max-fret must be between 1 and {}, got {}",
                    MAX_CONFIGURABLE_FRET, max_fret
                )));
            }
            search.max_fret = max_fret;
        }

        let mut instruments = if raw.replace_builtin {
            InstrumentRegistry::empty()
        } else {
            InstrumentRegistry::builtin()
        };
        for raw_instrument in raw.instruments {
            instruments.insert(parse_instrument(raw_instrument)?);
        }
        if instruments.is_empty() {
            return Err(FretError::ConfigError(
                "configuration leaves no instruments".to_string(),
            ));
        }

        Ok(Config {
            search,
            instruments,
        })
    }
}

fn parse_instrument(raw: RawInstrument) -> Result<Instrument> {
    let strings = raw
        .strings
        .iter()
        .map(|name| {
            PitchClass::from_name(name.trim()).map_err(|_| {
                FretError::ConfigError(format!(
                    "instrument '{}': unknown string note '{}'",
                    raw.id, name
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let labels = raw
        .string_labels
        .unwrap_or_else(|| ordinal_labels(strings.len()));
    let name = raw.name.unwrap_or_else(|| raw.id.clone());
    Instrument::new(raw.id, name, raw.icon.unwrap_or_default(), strings, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.search, SearchOptions::default());
        assert_eq!(config.instruments.len(), 4);
    }

    #[test]
    fn test_add_and_replace_instruments() {
        let yaml = r#"
max-fret: 7
instruments:
  - id: mandolin
    name: Mandolin
    strings: [G, D, A, E]
  - id: guitar
    name: Drop D
    strings: [D, A, D, G, B, E]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.search.max_fret, 7);
        assert_eq!(config.instruments.ids(), vec!["guitar", "charango", "ronroco", "ukulele", "mandolin"]);

        let mandolin = config.instruments.get("mandolin").unwrap();
        assert_eq!(mandolin.string_labels(), &["4th", "3rd", "2nd", "1st"]);
        assert_eq!(mandolin.icon(), "");

        let guitar = config.instruments.get("guitar").unwrap();
        assert_eq!(guitar.name(), "Drop D");
        assert_eq!(guitar.strings()[0].name(), "D");
        // The configured tuning is the reset point
        assert!(!guitar.is_modified());
    }

    #[test]
    fn test_replace_builtin() {
        let yaml = r#"
replace-builtin: true
instruments:
  - id: bass
    strings: [E, A, D, G]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.instruments.ids(), vec!["bass"]);
        assert_eq!(config.instruments.get("bass").unwrap().name(), "bass");

        let err = Config::from_yaml("replace-builtin: true").unwrap_err();
        assert!(matches!(err, FretError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_configs() {
        for yaml in [
            "max-fret: 0",
            "max-fret: 30",
            "max-fret: lots",
            "instruments:\n  - id: x\n    strings: [E, H]\n",
            "instruments:\n  - id: x\n    strings: []\n",
            "instruments:\n  - id: x\n    strings: [E, A]\n    string-labels: [one]\n",
            "instruments: [",
        ] {
            assert!(
                matches!(Config::from_yaml(yaml), Err(FretError::ConfigError(_))),
                "{:?} should be rejected",
                yaml
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max-fret: 4").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.search.max_fret, 4);

        let missing = Config::load(Path::new("/nonexistent/fretwise.yaml"));
        assert!(matches!(missing, Err(FretError::Io(_))));
    }
}
