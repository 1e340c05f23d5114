//! # Keys
//!
//! A [`Key`] is a spelled tonic plus a [`Mode`]. Keys are written as chart
//! key strings: a root name optionally followed by `m` for minor
//! (`"F#m"`, `"Bb"`, `"Am"`).
//!
//! ## Relative Major
//! Nashville numbers are always counted from the relative major, even for
//! songs in a minor key. [`Key::relative_major`] uses a fixed table of
//! conventional spellings (F minor → Ab, not G#) and only falls back to
//! arithmetic (tonic up a minor third) for spellings the table does not list.
//! Roman numerals never use the relative major.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::pitch::{Accidental, Interval, Note, NoteName, Spelling};

/// Mode for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    /// Parse a mode suffix: "", "maj", "major" or "m", "min", "minor"
    fn from_suffix(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "maj" | "major" => Some(Mode::Major),
            "m" | "min" | "minor" => Some(Mode::Minor),
            _ => None,
        }
    }
}

/// Tonic + mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
    pub tonic: Note,
    pub mode: Mode,
}

impl Default for Key {
    fn default() -> Self {
        Self {
            tonic: Note::new(NoteName::C, Accidental::Natural),
            mode: Mode::Major,
        }
    }
}

impl Key {
    pub fn new(tonic: Note, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    pub fn is_minor(&self) -> bool {
        self.mode == Mode::Minor
    }

    /// The relative major of a minor key. Major keys return themselves.
    pub fn relative_major(&self) -> Key {
        match self.mode {
            Mode::Major => *self,
            Mode::Minor => Key::new(relative_major_tonic(self.tonic), Mode::Major),
        }
    }

    /// The key Nashville numbers are counted from
    pub fn nashville_reference(&self) -> Key {
        self.relative_major()
    }

    /// Number of sharps (positive) or flats (negative) in the key signature, -7 to 7
    pub fn fifths(&self) -> i8 {
        let major = self.relative_major().tonic;
        let flat_spelled = major.accidental == Accidental::Flat;
        match major.pitch_class().index() {
            0 => 0,
            1 if flat_spelled => -5, // Db
            1 => 7,                  // C#
            2 => 2,
            3 => -3,
            4 => 4,
            5 => -1,
            6 if flat_spelled => -6, // Gb
            6 => 6,                  // F#
            7 => 1,
            8 => -4,
            9 => 3,
            10 => -2,
            _ if flat_spelled => -7, // Cb
            _ => 5,
        }
    }

    /// Accidental preference implied by the key signature.
    ///
    /// `None` for C major / A minor, which favour neither.
    pub fn spelling(&self) -> Option<Spelling> {
        match self.fifths() {
            f if f < 0 => Some(Spelling::Flat),
            f if f > 0 => Some(Spelling::Sharp),
            _ => None,
        }
    }
}

/// Conventional relative-major spellings for minor tonics.
///
/// Not purely arithmetic: the spelling follows common key signatures
/// (F minor → Ab major, G# minor → B major, Ab minor → B major).
fn relative_major_tonic(minor_tonic: Note) -> Note {
    use Accidental::{Flat, Natural, Sharp};
    use NoteName::*;

    let (name, accidental) = match (minor_tonic.name, minor_tonic.accidental) {
        (A, Natural) => (C, Natural),
        (E, Natural) => (G, Natural),
        (B, Natural) => (D, Natural),
        (F, Sharp) => (A, Natural),
        (C, Sharp) => (E, Natural),
        (G, Sharp) => (B, Natural),
        (D, Sharp) => (F, Sharp),
        (A, Sharp) => (C, Sharp),
        (D, Natural) => (F, Natural),
        (G, Natural) => (B, Flat),
        (C, Natural) => (E, Flat),
        (F, Natural) => (A, Flat),
        (B, Flat) => (D, Flat),
        (E, Flat) => (G, Flat),
        (A, Flat) => (B, Natural),
        (G, Flat) => (A, Natural),
        (D, Flat) => (E, Natural),
        _ => {
            // Cb, Fb, E#, B#: no conventional key, spell arithmetically
            let pc = minor_tonic.pitch_class().transpose(Interval::MINOR_THIRD);
            return pc.spell(minor_tonic.spelling().unwrap_or_default());
        }
    };
    Note::new(name, accidental)
}

/// Build a key from a tonic name and mode.
pub fn resolve_key(tonic_name: &str, mode: Mode) -> Result<Key, ParseError> {
    let tonic = tonic_name
        .parse::<Note>()
        .map_err(|_| ParseError::InvalidKey(tonic_name.to_string()))?;
    Ok(Key::new(tonic, mode))
}

impl FromStr for Key {
    type Err = ParseError;

    /// Parse a key string like "C", "Bb", "F#m", "Ebm" or "D minor"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (tonic, rest) =
            Note::parse_prefix(trimmed).ok_or_else(|| ParseError::InvalidKey(s.to_string()))?;
        let mode = Mode::from_suffix(rest).ok_or_else(|| ParseError::InvalidKey(s.to_string()))?;
        Ok(Key::new(tonic, mode))
    }
}

impl TryFrom<String> for Key {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.tonic),
            Mode::Minor => write!(f, "{}m", self.tonic),
        }
    }
}
