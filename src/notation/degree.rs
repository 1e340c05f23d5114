//! Interval → scale degree tables shared by the Roman and Nashville renderers

use crate::pitch::Interval;

/// Placeholder for an interval with no degree token
pub const UNMAPPED: &str = "?";

/// (Roman numeral, Nashville number) for each ascending interval from the tonic.
///
/// The tritone is spelled as a raised fourth in both notations.
const DEGREES: [(&str, &str); 12] = [
    ("I", "1"),
    ("♭II", "♭2"),
    ("II", "2"),
    ("♭III", "♭3"),
    ("III", "3"),
    ("IV", "4"),
    ("♯IV", "♯4"),
    ("V", "5"),
    ("♭VI", "♭6"),
    ("VI", "6"),
    ("♭VII", "♭7"),
    ("VII", "7"),
];

pub fn roman_degree(interval: Interval) -> &'static str {
    DEGREES
        .get(interval.semitones() as usize)
        .map(|(roman, _)| *roman)
        .unwrap_or(UNMAPPED)
}

pub fn nashville_degree(interval: Interval) -> &'static str {
    DEGREES
        .get(interval.semitones() as usize)
        .map(|(_, number)| *number)
        .unwrap_or(UNMAPPED)
}
