//! Nashville Number System rendering
//!
//! Numbers are counted from the relative major when the key is minor, so a
//! song in A minor numbers its C chord as `1`.

use crate::chord::{ParsedChord, REST};
use crate::key::Key;

use super::degree::nashville_degree;

/// Render a parsed chord as a Nashville number in `key`.
///
/// Minor chords get a trailing `-` (`6-`, `2-7`), diminished/augmented get
/// `°`/`+`, and a bass note stays an absolute note name.
pub fn render_nashville(chord: &ParsedChord, key: &Key) -> String {
    let symbol = match chord {
        ParsedChord::Chord(symbol) => symbol,
        ParsedChord::Rest => return REST.to_string(),
        ParsedChord::Nashville(token) | ParsedChord::Unparsed(token) => return token.clone(),
    };

    let reference = key.nashville_reference();
    let interval = reference.tonic.pitch_class().interval_to(symbol.root.pitch_class());

    let mut out = nashville_degree(interval).to_string();
    if symbol.is_minor() {
        out.push('-');
    }
    out.push_str(&symbol.degree_suffix());
    if let Some(bass) = &symbol.bass {
        out.push('/');
        out.push_str(&bass.to_string());
    }
    out
}
