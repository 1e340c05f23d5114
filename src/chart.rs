//! # Chart Types
//!
//! Value types for chord charts as they cross the boundary with storage,
//! generation and export layers.
//!
//! ## Type Hierarchy
//! ```text
//! Chart
//!   ├── title: Option<String>
//!   ├── key: Key ("F#m", "Bb")
//!   ├── time_signature: TimeSignature ("4/4")
//!   └── Vec<Section>
//!         ├── label: SectionLabel (Intro, Verse, Chorus, ...)
//!         ├── repeat: u32
//!         └── Vec<Measure>
//!               ├── cue: Option<String>
//!               └── Vec<ChordEntry>
//!                     ├── chord: String (chord token or "-")
//!                     ├── beats: Beats (exact rational)
//!                     └── symbols: Vec<Symbol> (push, fermata, ...)
//! ```
//!
//! ## Beats
//! Beats are exact rationals so that evenly split measures (4 beats over 3
//! chords) still sum to the time signature numerator exactly. On the wire
//! they are plain JSON numbers.
//!
//! ## Ownership
//! Every type here is a plain value. Transformations in `transpose` and
//! `normalize` build new values; nothing is mutated in place.

use std::fmt;
use std::str::FromStr;

use num_rational::Rational64;
use num_traits::CheckedAdd;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::key::Key;
use crate::notation::NotationMode;

/// Beat count of a chord within a measure
pub type Beats = Rational64;

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSignature {
    pub beats: u8,
    pub beat_type: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            beats: 4,
            beat_type: 4,
        }
    }
}

impl TimeSignature {
    /// Beats each measure must hold; only the numerator matters
    pub fn measure_beats(&self) -> Beats {
        Beats::from_integer(self.beats as i64)
    }
}

impl FromStr for TimeSignature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidTimeSignature(s.to_string());
        let (num, den) = s.trim().split_once('/').ok_or_else(invalid)?;
        let beats: u8 = num.trim().parse().map_err(|_| invalid())?;
        let beat_type: u8 = den.trim().parse().map_err(|_| invalid())?;
        if beats == 0 || beat_type == 0 {
            return Err(invalid());
        }
        Ok(Self { beats, beat_type })
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSignature> for String {
    fn from(ts: TimeSignature) -> Self {
        ts.to_string()
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.beat_type)
    }
}

/// Articulation tags attached to a chord hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Diamond,
    Marcato,
    Push,
    Pull,
    Fermata,
    BassUp,
    BassDown,
}

impl FromStr for Symbol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "diamond" => Ok(Symbol::Diamond),
            "marcato" => Ok(Symbol::Marcato),
            "push" => Ok(Symbol::Push),
            "pull" => Ok(Symbol::Pull),
            "fermata" => Ok(Symbol::Fermata),
            "bass_up" => Ok(Symbol::BassUp),
            "bass_down" => Ok(Symbol::BassDown),
            _ => Err(()),
        }
    }
}

/// One chord (or rest) and how long it lasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordEntry {
    pub chord: String,
    #[serde(with = "beats_serde")]
    pub beats: Beats,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl ChordEntry {
    pub fn new(chord: impl Into<String>, beats: Beats) -> Self {
        Self {
            chord: chord.into(),
            beats,
            symbols: Vec::new(),
        }
    }

    /// A rest lasting `beats`
    pub fn rest(beats: Beats) -> Self {
        Self::new(crate::chord::REST, beats)
    }

    pub fn is_rest(&self) -> bool {
        crate::chord::parse_chord(&self.chord).is_rest()
    }
}

/// A bar of chords
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Measure {
    pub chords: Vec<ChordEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cue: Option<String>,
}

impl Measure {
    pub fn total_beats(&self) -> Beats {
        self.chords.iter().map(|c| c.beats).sum()
    }

    /// Sum of the chord beats, `None` on overflow
    pub fn checked_total_beats(&self) -> Option<Beats> {
        self.chords
            .iter()
            .try_fold(Beats::from_integer(0), |total, c| total.checked_add(&c.beats))
    }
}

/// Section labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionLabel {
    Intro,
    #[default]
    Verse,
    PreChorus,
    Chorus,
    Bridge,
    Interlude,
    Instrumental,
    Solo,
    Breakdown,
    Tag,
    Outro,
}

impl SectionLabel {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionLabel::Intro => "Intro",
            SectionLabel::Verse => "Verse",
            SectionLabel::PreChorus => "Pre-Chorus",
            SectionLabel::Chorus => "Chorus",
            SectionLabel::Bridge => "Bridge",
            SectionLabel::Interlude => "Interlude",
            SectionLabel::Instrumental => "Instrumental",
            SectionLabel::Solo => "Solo",
            SectionLabel::Breakdown => "Breakdown",
            SectionLabel::Tag => "Tag",
            SectionLabel::Outro => "Outro",
        }
    }
}

impl FromStr for SectionLabel {
    type Err = ();

    /// Parse free-text labels: "Verse 2", "pre-chorus", "CHORUS", "Pre Chorus"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "intro" => Ok(SectionLabel::Intro),
            "verse" => Ok(SectionLabel::Verse),
            "prechorus" => Ok(SectionLabel::PreChorus),
            "chorus" | "refrain" => Ok(SectionLabel::Chorus),
            "bridge" => Ok(SectionLabel::Bridge),
            "interlude" => Ok(SectionLabel::Interlude),
            "instrumental" => Ok(SectionLabel::Instrumental),
            "solo" => Ok(SectionLabel::Solo),
            "breakdown" => Ok(SectionLabel::Breakdown),
            "tag" => Ok(SectionLabel::Tag),
            "outro" | "ending" | "coda" => Ok(SectionLabel::Outro),
            _ => Err(()),
        }
    }
}

fn default_repeat() -> u32 {
    1
}

/// A labelled run of measures, optionally repeated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub label: SectionLabel,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    pub measures: Vec<Measure>,
}

/// A complete chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Chart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub key: Key,
    #[serde(default)]
    pub time_signature: TimeSignature,
    pub sections: Vec<Section>,
}

impl Chart {
    /// Plain-text lead sheet in the given notation.
    ///
    /// Measures are bar-separated; chords that do not split the bar evenly
    /// carry their beat count in parentheses.
    pub fn to_text(&self, mode: NotationMode) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&format!(
            "Key: {} | Time: {}\n",
            mode.key_label(&self.key),
            self.time_signature
        ));

        for section in &self.sections {
            out.push('\n');
            out.push_str(&format!("[{}", section.label.display_name()));
            if section.repeat > 1 {
                out.push_str(&format!(" x{}", section.repeat));
            }
            out.push_str("]\n|");
            for measure in &section.measures {
                out.push(' ');
                out.push_str(&self.measure_text(measure, mode));
                out.push_str(" |");
            }
            out.push('\n');
        }
        out
    }

    fn measure_text(&self, measure: &Measure, mode: NotationMode) -> String {
        let even = measure.chords.iter().all(|c| c.beats == measure.chords[0].beats);
        let mut parts: Vec<String> = measure
            .chords
            .iter()
            .map(|entry| {
                let rendered = mode.render(&entry.chord, &self.key);
                if even {
                    rendered
                } else {
                    format!("{}({})", rendered, entry.beats)
                }
            })
            .collect();
        if let Some(cue) = &measure.cue {
            parts.push(format!("\"{}\"", cue));
        }
        parts.join(" ")
    }
}

/// Beats travel as JSON numbers: integers when whole, decimals otherwise
pub(crate) mod beats_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Beats;

    pub fn serialize<S: Serializer>(beats: &Beats, serializer: S) -> Result<S::Ok, S::Error> {
        if beats.is_integer() {
            serializer.serialize_i64(beats.to_integer())
        } else {
            serializer.serialize_f64(*beats.numer() as f64 / *beats.denom() as f64)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Beats, D::Error> {
        let value = f64::deserialize(deserializer)?;
        super::beats_from_f64(value)
            .ok_or_else(|| D::Error::custom(format!("invalid beat count: {}", value)))
    }
}

/// Subdivisions of a beat that wire counts are rounded to
pub const TICKS_PER_BEAT: i64 = 960;

/// Largest beat count accepted from the wire for a single chord
pub const MAX_BEATS: f64 = 1024.0;

/// Convert a wire beat count to an exact rational on a 1/960 grid.
///
/// `None` for NaN, infinite, non-positive, above [`MAX_BEATS`] or rounding to
/// zero ticks.
pub fn beats_from_f64(value: f64) -> Option<Beats> {
    if !value.is_finite() || value <= 0.0 || value > MAX_BEATS {
        return None;
    }
    let ticks = (value * TICKS_PER_BEAT as f64).round() as i64;
    if ticks == 0 {
        return None;
    }
    Some(Beats::new(ticks, TICKS_PER_BEAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_time_signature_parse() {
        let ts: TimeSignature = "6/8".parse().unwrap();
        assert_eq!(ts.beats, 6);
        assert_eq!(ts.beat_type, 8);
        assert_eq!(ts.to_string(), "6/8");
        assert_eq!(ts.measure_beats(), Beats::from_integer(6));
        assert!("4".parse::<TimeSignature>().is_err());
        assert!("0/4".parse::<TimeSignature>().is_err());
        assert!("x/4".parse::<TimeSignature>().is_err());
    }

    #[test]
    fn test_section_label_parse() {
        assert_eq!("Verse 2".parse(), Ok(SectionLabel::Verse));
        assert_eq!("pre-chorus".parse(), Ok(SectionLabel::PreChorus));
        assert_eq!("Pre Chorus".parse(), Ok(SectionLabel::PreChorus));
        assert_eq!("CHORUS".parse(), Ok(SectionLabel::Chorus));
        assert_eq!("Outro".parse(), Ok(SectionLabel::Outro));
        assert_eq!("Vamp".parse::<SectionLabel>(), Err(()));
    }

    #[test]
    fn test_symbol_parse() {
        assert_eq!("bass_up".parse(), Ok(Symbol::BassUp));
        assert_eq!("bass-down".parse(), Ok(Symbol::BassDown));
        assert_eq!("Fermata".parse(), Ok(Symbol::Fermata));
        assert_eq!("sparkle".parse::<Symbol>(), Err(()));
    }

    #[test]
    fn test_measure_json_shape() {
        let json = r#"{"chords":[{"chord":"C","beats":2,"symbols":["push"]},{"chord":"G/B","beats":1.5,"symbols":[]},{"chord":"-","beats":0.5}],"cue":"band in"}"#;
        let measure: Measure = serde_json::from_str(json).unwrap();
        assert_eq!(measure.chords.len(), 3);
        assert_eq!(measure.chords[0].symbols, vec![Symbol::Push]);
        assert_eq!(measure.chords[1].beats, Beats::new(3, 2));
        assert!(measure.chords[2].is_rest());
        assert_eq!(measure.total_beats(), Beats::from_integer(4));
        assert_eq!(measure.cue.as_deref(), Some("band in"));

        let out = serde_json::to_value(&measure).unwrap();
        assert_eq!(out["chords"][0]["beats"], serde_json::json!(2));
        assert_eq!(out["chords"][1]["beats"], serde_json::json!(1.5));
    }

    #[test]
    fn test_beats_from_f64() {
        assert_eq!(beats_from_f64(0.5), Some(Beats::new(1, 2)));
        assert_eq!(beats_from_f64(0.0), None);
        assert_eq!(beats_from_f64(-1.0), None);
        assert_eq!(beats_from_f64(f64::NAN), None);
        assert_eq!(beats_from_f64(1.0 / 3.0), Some(Beats::new(320, 960)));
        assert_eq!(beats_from_f64(0.1234567891), Some(Beats::new(119, 960)));
        assert_eq!(beats_from_f64(0.0001), None);
        assert_eq!(beats_from_f64(5e18), None);
        assert_eq!(beats_from_f64(MAX_BEATS), Some(Beats::from_integer(1024)));
    }

    #[test]
    fn test_checked_total_beats_overflow() {
        let huge = Beats::from_integer(i64::MAX / 2 + 1);
        let measure = Measure {
            chords: vec![ChordEntry::new("C", huge), ChordEntry::new("G", huge)],
            cue: None,
        };
        assert_eq!(measure.checked_total_beats(), None);

        let measure = Measure {
            chords: vec![ChordEntry::new("C", Beats::new(3, 2)), ChordEntry::new("G", Beats::new(5, 2))],
            cue: None,
        };
        assert_eq!(measure.checked_total_beats(), Some(Beats::from_integer(4)));
    }

    #[test]
    fn test_chart_to_text() {
        let chart: Chart = serde_json::from_str(
            r#"{
                "title": "Test Song",
                "key": "C",
                "time-signature": "4/4",
                "sections": [
                    {"label": "verse", "repeat": 2, "measures": [
                        {"chords": [{"chord": "C", "beats": 4}]},
                        {"chords": [{"chord": "Dm7", "beats": 2}, {"chord": "G7", "beats": 2}], "cue": "hits"},
                        {"chords": [{"chord": "F", "beats": 3}, {"chord": "G", "beats": 1}]}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            chart.to_text(NotationMode::Roman),
            "Test Song\nKey: C | Time: 4/4\n\n[Verse x2]\n| I | ii7 V7 \"hits\" | IV(3) V(1) |\n"
        );
    }
}
