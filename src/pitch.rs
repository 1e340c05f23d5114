//! # Pitch Classes and Intervals
//!
//! Spelled note names, the 12 chromatic pitch classes, and ascending semitone
//! intervals between them.
//!
//! ## Spelling vs Pitch Class
//! A [`Note`] keeps the spelling the user wrote (`C#` and `Db` are different
//! notes). A [`PitchClass`] is the spelling-independent chromatic step 0-11
//! (0=C, 1=C#/Db, ... 11=B). All arithmetic happens on pitch classes modulo 12,
//! and a [`Spelling`] preference turns the result back into a [`Note`].
//!
//! ## Intervals
//! [`Interval`] is always the ascending distance in semitones, 0-11. Callers
//! that need descending motion use [`Interval::inverse`].
//!
//! ## Example
//! ```rust
//! use chordchart::pitch::{distance, note_to_pitch_class};
//!
//! assert_eq!(note_to_pitch_class("Fb").unwrap().index(), 4);
//! assert_eq!(distance("A", "C").unwrap().semitones(), 3);
//! assert_eq!(distance("C", "A").unwrap().semitones(), 9);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    /// Semitone offset of the natural note from C
    fn semitone(self) -> u8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

/// Single accidentals only; double sharps/flats are not chart spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp, // # or ♯
    Flat,  // b or ♭
}

impl Accidental {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn offset(self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// Preferred accidental when turning a pitch class back into a note name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

/// Chromatic step 0-11, independent of spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any integer, wrapping modulo 12
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn transpose(self, interval: Interval) -> Self {
        PitchClass::new(self.0 as i32 + interval.semitones() as i32)
    }

    /// Ascending interval from `self` up to `target`
    pub fn interval_to(self, target: PitchClass) -> Interval {
        Interval::new(target.0 as i32 - self.0 as i32)
    }

    /// Spell this pitch class using the given accidental preference
    pub fn spell(self, spelling: Spelling) -> Note {
        let prefer_flat = spelling == Spelling::Flat;
        // 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
        let (name, accidental) = match self.0 {
            0 => (NoteName::C, Accidental::Natural),
            1 if prefer_flat => (NoteName::D, Accidental::Flat),
            1 => (NoteName::C, Accidental::Sharp),
            2 => (NoteName::D, Accidental::Natural),
            3 if prefer_flat => (NoteName::E, Accidental::Flat),
            3 => (NoteName::D, Accidental::Sharp),
            4 => (NoteName::E, Accidental::Natural),
            5 => (NoteName::F, Accidental::Natural),
            6 if prefer_flat => (NoteName::G, Accidental::Flat),
            6 => (NoteName::F, Accidental::Sharp),
            7 => (NoteName::G, Accidental::Natural),
            8 if prefer_flat => (NoteName::A, Accidental::Flat),
            8 => (NoteName::G, Accidental::Sharp),
            9 => (NoteName::A, Accidental::Natural),
            10 if prefer_flat => (NoteName::B, Accidental::Flat),
            10 => (NoteName::A, Accidental::Sharp),
            _ => (NoteName::B, Accidental::Natural),
        };
        Note { name, accidental }
    }
}

/// Ascending semitone distance, always 0-11
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval(u8);

impl Interval {
    pub const UNISON: Interval = Interval(0);
    pub const MINOR_THIRD: Interval = Interval(3);

    pub fn new(semitones: i32) -> Self {
        Interval(semitones.rem_euclid(12) as u8)
    }

    pub fn semitones(self) -> u8 {
        self.0
    }

    /// The interval that undoes this one
    pub fn inverse(self) -> Self {
        Interval::new(-(self.0 as i32))
    }
}

/// A spelled note: letter plus optional single accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl Note {
    pub fn new(name: NoteName, accidental: Accidental) -> Self {
        Self { name, accidental }
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.name.semitone() as i32 + self.accidental.offset() as i32)
    }

    /// The spelling this note was written with, if it carries an accidental
    pub fn spelling(&self) -> Option<Spelling> {
        match self.accidental {
            Accidental::Natural => None,
            Accidental::Sharp => Some(Spelling::Sharp),
            Accidental::Flat => Some(Spelling::Flat),
        }
    }

    /// Match the longest note prefix of `input` (letter + optional accidental).
    ///
    /// Returns the note and the unconsumed remainder, or `None` when `input`
    /// does not start with A-G.
    pub fn parse_prefix(input: &str) -> Option<(Note, &str)> {
        let mut chars = input.char_indices();
        let (_, first) = chars.next()?;
        let name = NoteName::from_char(first)?;
        let mut consumed = first.len_utf8();

        let accidental = match chars.next() {
            Some((_, c)) => match Accidental::from_char(c) {
                Some(acc) => {
                    consumed += c.len_utf8();
                    acc
                }
                None => Accidental::Natural,
            },
            None => Accidental::Natural,
        };

        Some((Note { name, accidental }, &input[consumed..]))
    }
}

impl FromStr for Note {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match Note::parse_prefix(trimmed) {
            Some((note, "")) => Ok(note),
            _ => Err(ParseError::InvalidNoteName(s.to_string())),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_char())?;
        match self.accidental {
            Accidental::Natural => Ok(()),
            Accidental::Sharp => write!(f, "#"),
            Accidental::Flat => write!(f, "b"),
        }
    }
}

/// Resolve a note name (e.g. "C#", "Bb", "Fb") to its pitch class.
///
/// Enharmonic spellings such as `Fb`, `Cb`, `E#` and `B#` resolve to their
/// sounding pitch. Double accidentals and non-letter input are rejected.
pub fn note_to_pitch_class(name: &str) -> Result<PitchClass, ParseError> {
    Ok(name.parse::<Note>()?.pitch_class())
}

/// Ascending semitone distance from one note name to another.
///
/// Always in 0-11: `distance("D", "C")` is 10, not -2.
pub fn distance(from: &str, to: &str) -> Result<Interval, ParseError> {
    let from = note_to_pitch_class(from)?;
    let to = note_to_pitch_class(to)?;
    Ok(from.interval_to(to))
}
