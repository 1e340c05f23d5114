//! # Error Types
//!
//! This module defines the error types for the chord chart engine.
//!
//! Most of the engine is lenient: renderers and transposition echo a malformed
//! chord back unchanged instead of failing. The errors here surface only from
//! the strict entry points (note/key/time-signature parsing, explicit chord
//! validation) and from batch ingestion.
//!
//! ## Error Types
//! - [`ParseError`] - Note names, key strings and time signatures
//! - [`ChordParseError`] - Strict chord validation (interactive chord editor)
//! - [`Rejection`] - Batch-level rejection from the measure normalizer
//! - [`ChartError`] - Crate-level umbrella returned by [`crate::ingest`]
//!
//! ## Usage
//! ```rust
//! use chordchart::{validate_chord, ChordParseError};
//!
//! match validate_chord("H7") {
//!     Ok(chord) => println!("valid: {}", chord),
//!     Err(ChordParseError::NoRootFound(token)) => eprintln!("no root in {}", token),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Errors from parsing note names, keys and time signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A note name that is not a letter A-G with at most one `#`/`b`.
    ///
    /// # Example
    /// ```
    /// # use chordchart::ParseError;
    /// let err = ParseError::InvalidNoteName("C##".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: 'C##'");
    /// ```
    #[error("Invalid note name: '{0}'")]
    InvalidNoteName(String),

    #[error("Invalid key: '{0}'")]
    InvalidKey(String),

    /// Time signatures must be `<numerator>/<denominator>` with a non-zero numerator.
    #[error("Invalid time signature: '{0}' (expected N/D, e.g. 4/4)")]
    InvalidTimeSignature(String),

    #[error("Unknown notation '{0}' (expected standard, roman or nashville)")]
    InvalidNotation(String),
}

/// Errors from the strict chord validation entry point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    #[error("Empty chord symbol")]
    Empty,

    /// The token does not start with a letter A-G.
    ///
    /// # Example
    /// ```
    /// # use chordchart::ChordParseError;
    /// let err = ChordParseError::NoRootFound("H7".to_string());
    /// assert_eq!(err.to_string(), "No chord root found in 'H7'");
    /// ```
    #[error("No chord root found in '{0}'")]
    NoRootFound(String),

    #[error("Invalid bass note '{bass}' in chord '{chord}'")]
    InvalidBassNote { chord: String, bass: String },

    /// Nashville numbers are valid chart content but carry no absolute root.
    #[error("'{0}' is a Nashville number, not a chord symbol")]
    NashvilleNumber(String),
}

/// Batch-level rejection of generated or imported chart data.
///
/// The `Display` output is the machine-readable reason surfaced to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("No sections generated")]
    NoSections,

    #[error("Too many sections (likely fragmented)")]
    TooManySections { count: usize },

    /// Unique chord count exceeded both density thresholds.
    ///
    /// # Example
    /// ```
    /// # use chordchart::Rejection;
    /// let err = Rejection::HighChordDensity { unique: 28, measures: 30 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Unusually high chord density (28 unique chords in 30 measures), likely hallucination"
    /// );
    /// ```
    #[error("Unusually high chord density ({unique} unique chords in {measures} measures), likely hallucination")]
    HighChordDensity { unique: usize, measures: usize },
}

/// Crate-level error for workflows that combine parsing, ingestion and config.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Chord(#[from] ChordParseError),

    #[error("Chart rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Invalid chart payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
