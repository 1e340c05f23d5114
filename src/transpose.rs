//! # Transposition
//!
//! Shift chord roots and bass notes by the interval between two keys while
//! keeping quality, extension text and structure exactly as written.
//!
//! ## Spelling
//! Transposed notes are spelled from the target key signature: flat keys
//! (`F`, `Bb`, `Fm`, ...) spell with flats, sharp keys with sharps. Keys with
//! no accidentals (C major, A minor) keep each note's own spelling, so a
//! round trip through C leaves `Bb` as `Bb`.
//!
//! ## Graceful Degradation
//! Rests, Nashville numbers and unparseable tokens come back unchanged.
//! Nothing is ever dropped.

use tracing::debug;

use crate::chart::{Chart, ChordEntry, Measure, Section};
use crate::chord::{parse_chord, ChordSymbol, ParsedChord, REST};
use crate::key::Key;
use crate::pitch::{Interval, Note, Spelling};

/// Transpose a single note, preferring `target` spelling when one is given
fn transpose_note(note: Note, interval: Interval, target: Option<Spelling>) -> Note {
    let spelling = target.or(note.spelling()).unwrap_or_default();
    note.pitch_class().transpose(interval).spell(spelling)
}

fn transpose_symbol(chord: &ChordSymbol, interval: Interval, target: Option<Spelling>) -> ChordSymbol {
    ChordSymbol {
        root: transpose_note(chord.root, interval, target),
        quality: chord.quality,
        marker: chord.marker.clone(),
        extension: chord.extension.clone(),
        bass: chord.bass.map(|bass| transpose_note(bass, interval, target)),
    }
}

/// Transpose a parsed chord by `interval` and re-serialize it.
pub fn transpose_parsed(chord: &ParsedChord, interval: Interval, target: Option<Spelling>) -> String {
    match chord {
        ParsedChord::Chord(symbol) => transpose_symbol(symbol, interval, target).to_string(),
        ParsedChord::Rest => REST.to_string(),
        ParsedChord::Nashville(token) | ParsedChord::Unparsed(token) => token.clone(),
    }
}

/// Transpose a chord token by a raw interval.
pub fn transpose_chord_by(token: &str, interval: Interval, target: Option<Spelling>) -> String {
    match parse_chord(token) {
        ParsedChord::Unparsed(_) => token.to_string(),
        parsed => transpose_parsed(&parsed, interval, target),
    }
}

/// Transpose a chord token from one key to another.
///
/// # Examples
/// ```
/// use chordchart::{transpose_chord, Key};
///
/// let c: Key = "C".parse().unwrap();
/// let d: Key = "D".parse().unwrap();
/// assert_eq!(transpose_chord("C/E", &c, &d), "D/F#");
/// assert_eq!(transpose_chord("-", &c, &d), "-");
/// ```
pub fn transpose_chord(token: &str, from: &Key, to: &Key) -> String {
    let interval = from.tonic.pitch_class().interval_to(to.tonic.pitch_class());
    transpose_chord_by(token, interval, to.spelling())
}

/// Transpose every chord of every measure, preserving order, beats,
/// articulation symbols and cues.
pub fn transpose_section_measures(measures: &[Measure], from: &Key, to: &Key) -> Vec<Measure> {
    let interval = from.tonic.pitch_class().interval_to(to.tonic.pitch_class());
    let target = to.spelling();

    measures
        .iter()
        .map(|measure| Measure {
            chords: measure
                .chords
                .iter()
                .map(|entry| ChordEntry {
                    chord: transpose_chord_by(&entry.chord, interval, target),
                    beats: entry.beats,
                    symbols: entry.symbols.clone(),
                })
                .collect(),
            cue: measure.cue.clone(),
        })
        .collect()
}

pub fn transpose_sections(sections: &[Section], from: &Key, to: &Key) -> Vec<Section> {
    sections
        .iter()
        .map(|section| Section {
            label: section.label,
            repeat: section.repeat,
            measures: transpose_section_measures(&section.measures, from, to),
        })
        .collect()
}

/// Move a whole chart to a new key (the key-change workflow).
pub fn transpose_chart(chart: &Chart, to: &Key) -> Chart {
    debug!(from = %chart.key, to = %to, sections = chart.sections.len(), "transposing chart");
    Chart {
        title: chart.title.clone(),
        key: *to,
        time_signature: chart.time_signature,
        sections: transpose_sections(&chart.sections, &chart.key, to),
    }
}
