//! # Chord Symbol Parsing
//!
//! Decomposes chord tokens such as `F#m7/A` into root, quality, extension
//! suffix and optional bass note.
//!
//! ## Token Classes
//! - **Rest**: empty token or `-`
//! - **Nashville number**: starts with a degree `1`-`7` (`4`, `6-`, `5°`); valid
//!   chart content with no absolute root, passed through untouched
//! - **Chord symbol**: root `A`-`G` with optional `#`/`b`, a quality marker,
//!   a verbatim extension suffix, and an optional `/bass`
//! - **Unparsed**: anything else; kept verbatim so it can be echoed back
//!
//! ## Quality Markers
//! Scanned right after the root, in priority order:
//! - `maj`, `M` → major family (`maj7`, `M7` → major 7th)
//! - `min`, `m`, `-` → minor family (`m7` → minor 7th)
//! - `dim`, `°` → diminished
//! - `aug`, `+` → augmented
//! - no marker → major triad, dominant 7th (`7`, `9`, `11`, `13`), `sus2`/`sus4`
//!
//! ## Lossless Extensions
//! Everything after the marker (9ths, alterations, `add9`, `sus4`, `6/9`) is
//! kept verbatim as the extension suffix, so [`ChordSymbol`]'s `Display`
//! reproduces the original token.
//!
//! ## Lenient vs Strict
//! [`parse_chord`] never fails: a malformed bass degrades to extension text
//! and a token without a root becomes [`ParsedChord::Unparsed`].
//! [`validate_chord`] is the strict entry point for the interactive editor.

use std::fmt;

use tracing::debug;

use crate::error::ChordParseError;
use crate::pitch::Note;

/// Chord quality inferred from the marker and the leading extension digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    /// Suffix the quality table does not recognise (kept verbatim in the extension)
    Other,
}

impl Quality {
    pub fn is_minor(self) -> bool {
        matches!(self, Quality::Minor | Quality::Minor7)
    }
}

/// A parsed chord symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChordSymbol {
    pub root: Note,
    pub quality: Quality,
    /// Quality marker exactly as written: "", "m", "min", "-", "maj", "M", "dim", "°", "aug", "+"
    pub marker: String,
    /// Verbatim remainder between the marker and the bass
    pub extension: String,
    pub bass: Option<Note>,
}

impl ChordSymbol {
    pub fn is_minor(&self) -> bool {
        self.quality.is_minor()
    }

    /// Suffix to print after a scale degree.
    ///
    /// The minor marker is dropped (the degree itself shows minor-ness) and
    /// diminished/augmented markers become `°`/`+`. Major markers (`maj7`)
    /// stay as written.
    pub fn degree_suffix(&self) -> String {
        let marker = match self.quality {
            Quality::Diminished => "°",
            Quality::Augmented => "+",
            _ if self.is_minor_marker() => "",
            _ => self.marker.as_str(),
        };
        format!("{}{}", marker, self.extension)
    }

    fn is_minor_marker(&self) -> bool {
        matches!(self.marker.as_str(), "m" | "min" | "-")
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.root, self.marker, self.extension)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Result of lenient chord parsing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedChord {
    Chord(ChordSymbol),
    /// The `-` rest marker (also produced by an empty token)
    Rest,
    /// Already a Nashville number; no absolute root
    Nashville(String),
    /// Could not be decomposed; echoed back unchanged
    Unparsed(String),
}

impl ParsedChord {
    pub fn is_rest(&self) -> bool {
        matches!(self, ParsedChord::Rest)
    }

    pub fn as_chord(&self) -> Option<&ChordSymbol> {
        match self {
            ParsedChord::Chord(chord) => Some(chord),
            _ => None,
        }
    }
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedChord::Chord(chord) => write!(f, "{}", chord),
            ParsedChord::Rest => write!(f, "{}", REST),
            ParsedChord::Nashville(token) | ParsedChord::Unparsed(token) => write!(f, "{}", token),
        }
    }
}

/// The rest marker token
pub const REST: &str = "-";

/// Parse a chord token without ever failing.
///
/// # Examples
/// ```
/// use chordchart::chord::{parse_chord, ParsedChord, Quality};
///
/// let parsed = parse_chord("F#m7/A");
/// let chord = parsed.as_chord().unwrap();
/// assert_eq!(chord.root.to_string(), "F#");
/// assert_eq!(chord.quality, Quality::Minor7);
/// assert_eq!(chord.extension, "7");
/// assert_eq!(chord.bass.unwrap().to_string(), "A");
///
/// assert_eq!(parse_chord("-"), ParsedChord::Rest);
/// assert_eq!(parse_chord("6-"), ParsedChord::Nashville("6-".to_string()));
/// ```
pub fn parse_chord(token: &str) -> ParsedChord {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == REST {
        return ParsedChord::Rest;
    }
    if is_nashville_number(trimmed) {
        return ParsedChord::Nashville(trimmed.to_string());
    }

    match parse_symbol(trimmed, false) {
        Ok(chord) => ParsedChord::Chord(chord),
        Err(e) => {
            debug!(token = trimmed, error = %e, "chord left unparsed");
            ParsedChord::Unparsed(trimmed.to_string())
        }
    }
}

/// Strictly validate a chord token, as the interactive chord editor does.
///
/// Unlike [`parse_chord`], a malformed bass note is an error and rests or
/// Nashville numbers are not accepted as chord symbols.
pub fn validate_chord(token: &str) -> Result<ChordSymbol, ChordParseError> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == REST {
        return Err(ChordParseError::Empty);
    }
    if is_nashville_number(trimmed) {
        return Err(ChordParseError::NashvilleNumber(trimmed.to_string()));
    }
    parse_symbol(trimmed, true)
}

/// Nashville number tokens start with a scale degree 1-7
fn is_nashville_number(token: &str) -> bool {
    matches!(token.chars().next(), Some('1'..='7'))
}

fn parse_symbol(token: &str, strict: bool) -> Result<ChordSymbol, ChordParseError> {
    let (root, rest) =
        Note::parse_prefix(token).ok_or_else(|| ChordParseError::NoRootFound(token.to_string()))?;

    let marker = quality_marker(rest);
    let after_marker = &rest[marker.len()..];

    let (extension, bass) = match after_marker.rfind('/') {
        Some(slash) => {
            let bass_text = &after_marker[slash + 1..];
            match bass_text.parse::<Note>() {
                Ok(bass) => (&after_marker[..slash], Some(bass)),
                // 6/9 and similar are extensions, not slash chords
                Err(_) if strict && !starts_with_digit(bass_text) => {
                    return Err(ChordParseError::InvalidBassNote {
                        chord: token.to_string(),
                        bass: bass_text.to_string(),
                    });
                }
                Err(_) => {
                    debug!(token, bass = bass_text, "malformed bass kept as extension");
                    (after_marker, None)
                }
            }
        }
        None => (after_marker, None),
    };

    Ok(ChordSymbol {
        root,
        quality: infer_quality(marker, extension),
        marker: marker.to_string(),
        extension: extension.to_string(),
        bass,
    })
}

/// Find the quality marker at the start of the post-root text
fn quality_marker(rest: &str) -> &'static str {
    const MARKERS: [&str; 11] = ["maj", "Maj", "MAJ", "min", "dim", "aug", "M", "m", "-", "°", "+"];
    MARKERS
        .iter()
        .find(|marker| rest.starts_with(**marker))
        .copied()
        .unwrap_or("")
}

fn infer_quality(marker: &str, extension: &str) -> Quality {
    match marker {
        "m" | "min" | "-" if extension.starts_with('7') => Quality::Minor7,
        "m" | "min" | "-" => Quality::Minor,
        "dim" | "°" => Quality::Diminished,
        "aug" | "+" => Quality::Augmented,
        "maj" | "Maj" | "MAJ" | "M" if starts_with_digit(extension) => Quality::Major7,
        "maj" | "Maj" | "MAJ" | "M" => Quality::Major,
        _ => infer_unmarked_quality(extension),
    }
}

fn infer_unmarked_quality(extension: &str) -> Quality {
    if extension.is_empty() {
        Quality::Major
    } else if ["7", "9", "11", "13"].iter().any(|d| extension.starts_with(d)) {
        Quality::Dominant7
    } else if extension.starts_with("sus2") {
        Quality::Sus2
    } else if extension.starts_with("sus") {
        Quality::Sus4
    } else if ["6", "5", "add", "("].iter().any(|p| extension.starts_with(p)) {
        Quality::Major
    } else {
        Quality::Other
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{Accidental, NoteName};

    fn chord(token: &str) -> ChordSymbol {
        match parse_chord(token) {
            ParsedChord::Chord(chord) => chord,
            other => panic!("{} did not parse as a chord: {:?}", token, other),
        }
    }

    #[test]
    fn test_quality_table() {
        let cases = [
            ("C", Quality::Major),
            ("Am", Quality::Minor),
            ("G7", Quality::Dominant7),
            ("Cmaj7", Quality::Major7),
            ("CM7", Quality::Major7),
            ("Dm7", Quality::Minor7),
            ("Bdim", Quality::Diminished),
            ("B°7", Quality::Diminished),
            ("Caug", Quality::Augmented),
            ("C+", Quality::Augmented),
            ("Dsus2", Quality::Sus2),
            ("Dsus4", Quality::Sus4),
            ("Dsus", Quality::Sus4),
            ("G9", Quality::Dominant7),
            ("G13", Quality::Dominant7),
            ("C6", Quality::Major),
            ("Cadd9", Quality::Major),
            ("Cmaj", Quality::Major),
            ("Cmin", Quality::Minor),
            ("C-7", Quality::Minor7),
            ("Cø7", Quality::Other),
        ];
        for (token, quality) in cases {
            assert_eq!(chord(token).quality, quality, "{}", token);
        }
    }

    #[test]
    fn test_minor_marker_not_maj() {
        let c = chord("Cmaj7");
        assert_eq!(c.marker, "maj");
        assert_eq!(c.extension, "7");

        let c = chord("Cm");
        assert_eq!(c.marker, "m");
        assert_eq!(c.extension, "");
    }

    #[test]
    fn test_slash_chord() {
        let c = chord("F#m7/A");
        assert_eq!(c.root, Note::new(NoteName::F, Accidental::Sharp));
        assert_eq!(c.marker, "m");
        assert_eq!(c.extension, "7");
        assert_eq!(c.bass, Some(Note::new(NoteName::A, Accidental::Natural)));
    }

    #[test]
    fn test_malformed_bass_degrades_to_extension() {
        let c = chord("C/X");
        assert_eq!(c.bass, None);
        assert_eq!(c.extension, "/X");
        assert_eq!(c.to_string(), "C/X");

        let c = chord("C6/9");
        assert_eq!(c.bass, None);
        assert_eq!(c.extension, "6/9");
    }

    #[test]
    fn test_extensions_kept_verbatim() {
        let c = chord("G7(b9)#11");
        assert_eq!(c.quality, Quality::Dominant7);
        assert_eq!(c.extension, "7(b9)#11");
    }

    #[test]
    fn test_display_round_trip() {
        for token in ["C", "F#m7/A", "Bbmaj7", "Ebdim7", "Gsus4", "C6/9", "D/F#", "Am7b5", "C+", "A-7"] {
            assert_eq!(chord(token).to_string(), token);
            assert_eq!(chord(&chord(token).to_string()), chord(token));
        }
    }

    #[test]
    fn test_rest_and_empty() {
        assert_eq!(parse_chord("-"), ParsedChord::Rest);
        assert_eq!(parse_chord(""), ParsedChord::Rest);
        assert_eq!(parse_chord("  "), ParsedChord::Rest);
        assert_eq!(ParsedChord::Rest.to_string(), "-");
    }

    #[test]
    fn test_nashville_passthrough() {
        for token in ["1", "4", "6-", "5+", "7°", "4Δ"] {
            assert_eq!(parse_chord(token), ParsedChord::Nashville(token.to_string()));
        }
    }

    #[test]
    fn test_unparsed() {
        assert_eq!(parse_chord("H7"), ParsedChord::Unparsed("H7".to_string()));
        assert_eq!(parse_chord("N.C."), ParsedChord::Unparsed("N.C.".to_string()));
        assert_eq!(parse_chord("x").to_string(), "x");
    }

    #[test]
    fn test_validate_chord() {
        assert!(validate_chord("Dm7").is_ok());
        assert!(validate_chord("C6/9").is_ok());
        assert_eq!(validate_chord(""), Err(ChordParseError::Empty));
        assert_eq!(
            validate_chord("H7"),
            Err(ChordParseError::NoRootFound("H7".to_string()))
        );
        assert_eq!(
            validate_chord("C/X"),
            Err(ChordParseError::InvalidBassNote {
                chord: "C/X".to_string(),
                bass: "X".to_string()
            })
        );
        assert_eq!(
            validate_chord("4"),
            Err(ChordParseError::NashvilleNumber("4".to_string()))
        );
    }

    #[test]
    fn test_degree_suffix() {
        assert_eq!(chord("Dm7").degree_suffix(), "7");
        assert_eq!(chord("Cmaj7").degree_suffix(), "maj7");
        assert_eq!(chord("Bdim7").degree_suffix(), "°7");
        assert_eq!(chord("Caug").degree_suffix(), "+");
        assert_eq!(chord("G7sus4").degree_suffix(), "7sus4");
    }
}
