//! Chord notation, transposition and measure normalization for chord charts.
//!
//! The engine is a leaf library of pure functions: every call reads its
//! inputs and returns fresh values, so callers may run independent calls
//! (one per section, say) in parallel without coordination.
//!
//! # Example
//!
//! ```
//! use chordchart::{render_token, transpose_token, Key, NotationMode};
//!
//! let c: Key = "C".parse().unwrap();
//! assert_eq!(render_token("Dm7", &c, NotationMode::Roman), "ii7");
//!
//! let am: Key = "Am".parse().unwrap();
//! assert_eq!(render_token("C", &am, NotationMode::Nashville), "1");
//!
//! let d: Key = "D".parse().unwrap();
//! assert_eq!(transpose_token("C/E", &c, &d), "D/F#");
//! ```

pub mod chart;
pub mod chord;
pub mod config;
pub mod error;
pub mod key;
pub mod normalize;
pub mod notation;
pub mod pitch;
pub mod transpose;

pub use chart::{Beats, Chart, ChordEntry, Measure, Section, SectionLabel, Symbol, TimeSignature};
pub use chord::{parse_chord, validate_chord, ChordSymbol, ParsedChord, Quality};
pub use config::NormalizerConfig;
pub use error::*;
pub use key::{resolve_key, Key, Mode};
pub use normalize::{normalize_sections, parse_payload, BatchStats, Normalized, RawChord, RawMeasure, RawSection};
pub use notation::{render_nashville, render_roman, render_standard, NotationMode};
pub use pitch::{distance, note_to_pitch_class, Interval, Note, PitchClass, Spelling};
pub use transpose::{transpose_chart, transpose_chord, transpose_section_measures};

/// Render a chord token in the given notation. Never fails.
pub fn render_token(token: &str, key: &Key, mode: NotationMode) -> String {
    mode.render(token, key)
}

/// Transpose a chord token between keys. Never fails.
pub fn transpose_token(token: &str, from: &Key, to: &Key) -> String {
    transpose_chord(token, from, to)
}

/// Ingest a generated or imported JSON payload with default thresholds.
///
/// Returns the normalized sections, or [`ChartError::Rejected`] with the
/// reason to show the user.
pub fn ingest(json: &str, time_signature: TimeSignature) -> Result<Vec<Section>, ChartError> {
    ingest_with_config(json, time_signature, &NormalizerConfig::default())
}

pub fn ingest_with_config(
    json: &str,
    time_signature: TimeSignature,
    config: &NormalizerConfig,
) -> Result<Vec<Section>, ChartError> {
    let raw = parse_payload(json)?;
    let normalized = normalize_sections(&raw, time_signature, config)?;
    Ok(normalized.sections)
}
