//! Chord symbol parsing
//!
//! Parses chord symbols (C, Am, G7, Dbmaj7, etc.) into chord descriptors for
//! the fingering search.

use tracing::warn;

use crate::chord::{ChordDescriptor, ChordQuality};
use crate::error::{FretError, Result};
use crate::pitch::PitchClass;

/// Quality suffixes accepted by the grammar (matched case-insensitively)
const QUALITY_SUFFIXES: [&str; 9] = ["", "m", "maj7", "m7", "7", "sus2", "sus4", "dim", "aug"];

/// Flat roots with a sharp equivalent in the note table
const FLAT_TO_SHARP: [(&str, &str); 5] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
];

/// Map a flat spelling to its sharp equivalent.
///
/// Spellings outside the table (`Cb`, `Fb`) come back unchanged and fail the
/// note lookup afterwards.
fn normalize_root(root: &str) -> String {
    FLAT_TO_SHARP
        .iter()
        .find(|(flat, _)| *flat == root)
        .map(|(_, sharp)| sharp.to_string())
        .unwrap_or_else(|| root.to_string())
}

/// Parse a single chord token.
///
/// # Grammar
/// `<A-G><#|b>?<quality>?` where quality is one of `m`, `maj7`, `m7`, `7`,
/// `sus2`, `sus4`, `dim`, `aug` or empty (major). Letters are matched
/// case-insensitively and the root is upper-cased.
///
/// # Examples
/// ```
/// use fretwise::chord::ChordQuality;
/// use fretwise::parse_chord_token;
///
/// let chord = parse_chord_token("Am7").unwrap();
/// assert_eq!(chord.root.name(), "A");
/// assert_eq!(chord.quality, ChordQuality::Min7);
/// assert_eq!(chord.symbol, "Am7");
///
/// // Flat roots are respelled with sharps
/// assert_eq!(parse_chord_token("Db").unwrap().symbol, "C#");
///
/// assert!(parse_chord_token("H").is_err());
/// ```
///
/// # Errors
/// - [`FretError::ParseError`] when the token doesn't match the grammar
/// - [`FretError::UnknownNote`] when a flat root has no sharp equivalent (`Cb`, `Fb`)
pub fn parse_chord_token(token: &str) -> Result<ChordDescriptor> {
    let parse_error = |message: String| FretError::ParseError {
        token: token.to_string(),
        message,
    };

    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return Err(parse_error("empty chord symbol".to_string()));
    }

    // Parse root letter
    let letter = chars[0].to_ascii_uppercase();
    if !('A'..='G').contains(&letter) {
        return Err(parse_error(format!(
            "root must be a letter A-G, found '{}'",
            chars[0]
        )));
    }
    let mut idx = 1;

    // Check for accidental
    let mut root = letter.to_string();
    if let Some(&c) = chars.get(idx) {
        match c {
            '#' => {
                root.push('#');
                idx += 1;
            }
            'b' | 'B' => {
                root.push('b');
                idx += 1;
            }
            _ => {}
        }
    }

    // Parse chord quality from remaining characters
    let quality_text: String = chars[idx..].iter().collect::<String>().to_ascii_lowercase();
    if !QUALITY_SUFFIXES.contains(&quality_text.as_str()) {
        return Err(parse_error(format!(
            "unknown chord quality '{}'",
            chars[idx..].iter().collect::<String>()
        )));
    }
    let quality = ChordQuality::from_suffix_or_major(&quality_text);

    let root = PitchClass::from_name(&normalize_root(&root))?;
    Ok(ChordDescriptor::new(root, quality))
}

/// Parse a whitespace-separated chord sequence.
///
/// Tokens that fail to parse are dropped; the result only holds the chords
/// that could be read, in input order.
///
/// # Examples
/// ```
/// use fretwise::parse_chord_sequence;
///
/// let chords = parse_chord_sequence("C  Am\tH F G7");
/// let symbols: Vec<&str> = chords.iter().map(|c| c.symbol.as_str()).collect();
/// assert_eq!(symbols, vec!["C", "Am", "F", "G7"]);
/// ```
pub fn parse_chord_sequence(sequence: &str) -> Vec<ChordDescriptor> {
    sequence
        .split_whitespace()
        .filter_map(|token| match parse_chord_token(token) {
            Ok(chord) => Some(chord),
            Err(e) => {
                warn!(token, error = %e, "dropping chord token");
                None
            }
        })
        .collect()
}
