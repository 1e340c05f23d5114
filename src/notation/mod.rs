//! # Notation Module
//!
//! Render chords in the three chart notations, relative to a [`Key`].
//!
//! ## Notations
//! - **Standard** - chord symbols as written (`Dm7`, `G/B`)
//! - **Roman** - Roman numerals from the key's own tonic (`ii7`, `V/B`)
//! - **Nashville** - scale degrees from the relative major (`2-7`, `5/B`)
//!
//! ## Sub-modules
//! - `degree` - Fixed interval → degree token tables
//! - `roman` - Roman numeral renderer
//! - `nashville` - Nashville Number System renderer
//!
//! ## Graceful Degradation
//! Every renderer maps the rest marker to `-` and returns Nashville numbers
//! and unparseable tokens unchanged. Nothing here returns an error; a chord
//! that cannot be understood is shown exactly as typed.
//!
//! ## Example
//! ```rust
//! use chordchart::{Key, NotationMode};
//!
//! let key: Key = "C".parse().unwrap();
//! assert_eq!(NotationMode::Roman.render("Dm7", &key), "ii7");
//! assert_eq!(NotationMode::Nashville.render("Dm7", &key), "2-7");
//! assert_eq!(NotationMode::Standard.render("Dm7", &key), "Dm7");
//! ```

mod degree;
mod nashville;
mod roman;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::{parse_chord, ParsedChord, REST};
use crate::error::ParseError;
use crate::key::Key;

pub use degree::UNMAPPED;
pub use nashville::render_nashville;
pub use roman::render_roman;

/// Render a parsed chord as a chord symbol.
///
/// Accidentals come out in ASCII (`Bb`, `F#`); use [`NotationMode::render`]
/// to keep a token exactly as written.
pub fn render_standard(chord: &ParsedChord, _key: &Key) -> String {
    match chord {
        ParsedChord::Rest => REST.to_string(),
        other => other.to_string(),
    }
}

/// Which notation a chart is displayed or exported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationMode {
    #[default]
    Standard,
    Roman,
    #[serde(alias = "nns")]
    Nashville,
}

impl NotationMode {
    /// Render a raw chord token in this notation.
    ///
    /// Standard notation returns the trimmed token as written, so `B♭m`
    /// stays `B♭m`.
    pub fn render(&self, token: &str, key: &Key) -> String {
        match (self, parse_chord(token)) {
            (_, ParsedChord::Rest) => REST.to_string(),
            (NotationMode::Standard, _) => token.trim().to_string(),
            (mode, parsed) => mode.render_parsed(&parsed, key),
        }
    }

    pub fn render_parsed(&self, chord: &ParsedChord, key: &Key) -> String {
        match self {
            NotationMode::Standard => render_standard(chord, key),
            NotationMode::Roman => render_roman(chord, key),
            NotationMode::Nashville => render_nashville(chord, key),
        }
    }

    /// Key caption for a chart header in this notation.
    ///
    /// Nashville charts of minor songs are numbered from the relative major,
    /// so the caption names both keys.
    pub fn key_label(&self, key: &Key) -> String {
        match self {
            NotationMode::Nashville if key.is_minor() => {
                format!("{} (1 = {})", key, key.nashville_reference())
            }
            _ => key.to_string(),
        }
    }
}

impl FromStr for NotationMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "symbols" | "chords" => Ok(NotationMode::Standard),
            "roman" | "roman-numerals" => Ok(NotationMode::Roman),
            "nashville" | "nns" | "numbers" => Ok(NotationMode::Nashville),
            _ => Err(ParseError::InvalidNotation(s.to_string())),
        }
    }
}

impl fmt::Display for NotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotationMode::Standard => "standard",
            NotationMode::Roman => "roman",
            NotationMode::Nashville => "nashville",
        };
        write!(f, "{}", name)
    }
}
