//! # Measure Normalization
//!
//! Validates and repairs batches of section data coming from chart
//! generation or import before they are stored.
//!
//! ## Stages
//! ```text
//! Parsed ──▶ BeatChecked ──▶ DensityChecked ──▶ Accepted
//!                                     └──────▶ Rejected(reason)
//! ```
//!
//! ### Parsed
//! Raw records become typed sections. Free-text labels are matched to
//! [`SectionLabel`] (unknown labels become `Verse`), unknown articulation
//! symbols are dropped, empty cues are cleared and a missing repeat count
//! means 1.
//!
//! ### BeatChecked
//! Each measure must hold exactly the time signature numerator in beats.
//! A measure whose beats are missing, non-positive, out of range or
//! mis-summed (including a sum that overflows) is repaired
//! by splitting the numerator evenly across its chords. A measure with no
//! chords becomes a single rest lasting the whole bar. Beat mismatches are
//! never errors.
//!
//! ### DensityChecked
//! Heuristics against fragmented or hallucinated generator output:
//! - no sections at all
//! - more than `max_sections` sections
//! - unique chords > ceil(measures / 2) + `density_slack` **and**
//!   unique chords > `min_unique_chords`
//!
//! Both density conditions are required so chord-rich jazz charts pass.
//!
//! ## Entry Point
//! [`normalize_sections`] returns either the complete normalized section
//! list or a [`Rejection`], never both and never a partial result.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chart::{beats_from_f64, Beats, ChordEntry, Measure, Section, SectionLabel, Symbol, TimeSignature};
use crate::chord::{parse_chord, REST};
use crate::config::NormalizerConfig;
use crate::error::Rejection;

/// Chord record as produced by generators and importers
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawChord {
    #[serde(default)]
    pub chord: String,
    #[serde(default)]
    pub beats: Option<f64>,
    #[serde(default)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMeasure {
    #[serde(default)]
    pub chords: Vec<RawChord>,
    #[serde(default)]
    pub cue: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSection {
    #[serde(default, alias = "name")]
    pub label: String,
    #[serde(default)]
    pub repeat: Option<u32>,
    #[serde(default)]
    pub measures: Vec<RawMeasure>,
}

/// Payloads arrive either wrapped (`{"sections": [...]}`) or as a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPayload {
    Wrapped { sections: Vec<RawSection> },
    Bare(Vec<RawSection>),
}

/// Parse a JSON ingestion payload into raw sections
pub fn parse_payload(json: &str) -> Result<Vec<RawSection>, serde_json::Error> {
    let payload: RawPayload = serde_json::from_str(json)?;
    Ok(match payload {
        RawPayload::Wrapped { sections } => sections,
        RawPayload::Bare(sections) => sections,
    })
}

/// Counts gathered during the density check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchStats {
    pub sections: usize,
    pub measures: usize,
    /// Non-rest chords
    pub chords: usize,
    pub unique_chords: usize,
}

/// An accepted batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    pub sections: Vec<Section>,
    pub stats: BatchStats,
}

/// Run the full Parsed → BeatChecked → DensityChecked pipeline.
pub fn normalize_sections(
    raw: &[RawSection],
    time_signature: TimeSignature,
    config: &NormalizerConfig,
) -> Result<Normalized, Rejection> {
    let parsed: Vec<Section> = raw.iter().map(parse_section).collect();
    let beat_checked = check_beats(parsed, time_signature);

    match check_density(&beat_checked, config) {
        Ok(stats) => {
            info!(
                sections = stats.sections,
                measures = stats.measures,
                chords = stats.chords,
                unique_chords = stats.unique_chords,
                "chart batch accepted"
            );
            Ok(Normalized {
                sections: beat_checked,
                stats,
            })
        }
        Err(rejection) => {
            warn!(reason = %rejection, "chart batch rejected");
            Err(rejection)
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed

fn parse_section(raw: &RawSection) -> Section {
    let label: SectionLabel = raw.label.parse().unwrap_or_else(|_| {
        warn!(label = %raw.label, "unknown section label, using Verse");
        SectionLabel::Verse
    });

    Section {
        label,
        repeat: raw.repeat.filter(|&r| r > 0).unwrap_or(1),
        measures: raw.measures.iter().map(parse_measure).collect(),
    }
}

fn parse_measure(raw: &RawMeasure) -> Measure {
    Measure {
        chords: raw.chords.iter().map(parse_chord_entry).collect(),
        cue: raw
            .cue
            .as_deref()
            .map(str::trim)
            .filter(|cue| !cue.is_empty())
            .map(str::to_string),
    }
}

fn parse_chord_entry(raw: &RawChord) -> ChordEntry {
    let chord = match raw.chord.trim() {
        "" => REST.to_string(),
        token => token.to_string(),
    };

    let mut symbols: Vec<Symbol> = Vec::new();
    for name in &raw.symbols {
        match name.parse::<Symbol>() {
            Ok(symbol) if !symbols.contains(&symbol) => symbols.push(symbol),
            Ok(_) => {}
            Err(()) => warn!(symbol = %name, chord = %chord, "dropping unknown symbol"),
        }
    }

    ChordEntry {
        chord,
        // Zero marks a missing or unusable count for the beat check to repair
        beats: raw
            .beats
            .and_then(beats_from_f64)
            .unwrap_or_else(|| Beats::from_integer(0)),
        symbols,
    }
}

// ---------------------------------------------------------------------------
// BeatChecked

fn check_beats(sections: Vec<Section>, time_signature: TimeSignature) -> Vec<Section> {
    sections
        .into_iter()
        .enumerate()
        .map(|(section_idx, section)| Section {
            measures: section
                .measures
                .into_iter()
                .enumerate()
                .map(|(measure_idx, measure)| {
                    repair_measure(measure, time_signature, section_idx + 1, measure_idx + 1)
                })
                .collect(),
            ..section
        })
        .collect()
}

/// Make a measure's beats sum to the time signature numerator
fn repair_measure(
    measure: Measure,
    time_signature: TimeSignature,
    section_number: usize,
    measure_number: usize,
) -> Measure {
    let expected = time_signature.measure_beats();

    if measure.chords.is_empty() {
        debug!(section_number, measure_number, "empty measure filled with rest");
        return Measure {
            chords: vec![ChordEntry::rest(expected)],
            cue: measure.cue,
        };
    }

    // An overflowing sum counts as a mismatch
    let total = measure.checked_total_beats();
    let all_positive = measure.chords.iter().all(|c| c.beats > Beats::from_integer(0));
    if all_positive && total == Some(expected) {
        return measure;
    }

    let share = expected / Beats::from_integer(measure.chords.len() as i64);
    debug!(
        section_number,
        measure_number,
        expected = %expected,
        got = ?total,
        share = %share,
        "beat mismatch, redistributing evenly"
    );

    Measure {
        chords: measure
            .chords
            .into_iter()
            .map(|entry| ChordEntry { beats: share, ..entry })
            .collect(),
        cue: measure.cue,
    }
}

// ---------------------------------------------------------------------------
// DensityChecked

fn check_density(sections: &[Section], config: &NormalizerConfig) -> Result<BatchStats, Rejection> {
    if sections.is_empty() {
        return Err(Rejection::NoSections);
    }
    if sections.len() > config.max_sections {
        return Err(Rejection::TooManySections {
            count: sections.len(),
        });
    }

    let mut measures = 0;
    let mut chords = 0;
    let mut unique: HashSet<&str> = HashSet::new();
    for section in sections {
        measures += section.measures.len();
        for entry in section.measures.iter().flat_map(|m| &m.chords) {
            if parse_chord(&entry.chord).is_rest() {
                continue;
            }
            chords += 1;
            unique.insert(entry.chord.as_str());
        }
    }

    let unique_chords = unique.len();
    if unique_chords > config.density_limit(measures) && unique_chords > config.min_unique_chords {
        return Err(Rejection::HighChordDensity {
            unique: unique_chords,
            measures,
        });
    }

    Ok(BatchStats {
        sections: sections.len(),
        measures,
        chords,
        unique_chords,
    })
}

/// Sorted unique non-rest chord tokens across sections
pub fn unique_chords(sections: &[Section]) -> BTreeSet<String> {
    sections
        .iter()
        .flat_map(|s| &s.measures)
        .flat_map(|m| &m.chords)
        .filter(|entry| !entry.is_rest())
        .map(|entry| entry.chord.clone())
        .collect()
}
