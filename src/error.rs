//! # Error Types
//!
//! This module defines the error type surfaced by the fretwise library.
//!
//! ## Error Types
//! - `UnknownNote` - A note name outside the twelve sharp-spelled pitch names
//! - `ParseError` - A chord token that does not match the chord grammar
//! - `UnknownInstrument` - An instrument id missing from the registry
//! - `StringOutOfRange` - A retune request for a string the instrument doesn't have
//! - `ConfigError` - Invalid YAML configuration
//! - `Io` - Failure reading a configuration file
//!
//! Finger assignment failures never reach callers: a candidate fingering that
//! cannot be fingered is discarded during the search.
//!
//! ## Usage
//! ```rust
//! use fretwise::{parse_chord_token, FretError};
//!
//! match parse_chord_token("Hm7") {
//!     Ok(chord) => println!("{}", chord.symbol),
//!     Err(FretError::ParseError { token, message }) => {
//!         eprintln!("Cannot read '{}': {}", token, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FretError>;

#[derive(Error, Debug)]
pub enum FretError {
    /// Note name not among `C C# D D# E F F# G G# A A# B`.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::UnknownNote("Cb".to_string());
    /// assert_eq!(err.to_string(), "Unknown note name: Cb");
    /// ```
    #[error("Unknown note name: {0}")]
    UnknownNote(String),

    /// Chord token that does not match `<A-G><#|b>?<quality>?`.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::ParseError {
    ///     token: "H".to_string(),
    ///     message: "root must be a letter A-G".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Cannot parse chord 'H': root must be a letter A-G");
    /// ```
    #[error("Cannot parse chord '{token}': {message}")]
    ParseError { token: String, message: String },

    /// Instrument id missing from the registry.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// String index past the instrument's string count.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::StringOutOfRange {
    ///     instrument: "ukulele".to_string(),
    ///     index: 4,
    ///     count: 4,
    /// };
    /// assert_eq!(err.to_string(), "String 4 out of range for ukulele (4 strings)");
    /// ```
    #[error("String {index} out of range for {instrument} ({count} strings)")]
    StringOutOfRange {
        instrument: String,
        index: usize,
        count: usize,
    },

    /// Invalid configuration.
    ///
    /// Occurs when the YAML is malformed or describes an unusable instrument.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
