//! Roman numeral rendering
//!
//! Degrees are always counted from the key's own tonic, major or minor.

use crate::chord::{ParsedChord, REST};
use crate::key::Key;

use super::degree::roman_degree;

/// Render a parsed chord as a Roman numeral in `key`.
///
/// Minor chords lower-case the numeral, diminished/augmented chords get
/// `°`/`+`, the remaining extension follows, and a bass note stays an
/// absolute note name (`V7/B`).
pub fn render_roman(chord: &ParsedChord, key: &Key) -> String {
    let symbol = match chord {
        ParsedChord::Chord(symbol) => symbol,
        ParsedChord::Rest => return REST.to_string(),
        ParsedChord::Nashville(token) | ParsedChord::Unparsed(token) => return token.clone(),
    };

    let interval = key.tonic.pitch_class().interval_to(symbol.root.pitch_class());
    let degree = roman_degree(interval);
    let numeral = if symbol.is_minor() {
        degree.to_lowercase()
    } else {
        degree.to_string()
    };

    let mut out = numeral;
    out.push_str(&symbol.degree_suffix());
    if let Some(bass) = &symbol.bass {
        out.push('/');
        out.push_str(&bass.to_string());
    }
    out
}
