use super::*;
use crate::pitch::Interval;

fn key(s: &str) -> Key {
    s.parse().unwrap()
}

fn roman(token: &str, k: &str) -> String {
    NotationMode::Roman.render(token, &key(k))
}

fn nns(token: &str, k: &str) -> String {
    NotationMode::Nashville.render(token, &key(k))
}

#[test]
fn test_roman_minor_seventh() {
    // C -> D is 2 semitones: II, minor lower-cases, 7 appended
    assert_eq!(roman("Dm7", "C"), "ii7");
}

#[test]
fn test_roman_diatonic_triads_in_c() {
    let cases = [
        ("C", "I"),
        ("Dm", "ii"),
        ("Em", "iii"),
        ("F", "IV"),
        ("G", "V"),
        ("Am", "vi"),
        ("Bdim", "VII°"),
    ];
    for (chord, expected) in cases {
        assert_eq!(roman(chord, "C"), expected, "{}", chord);
    }
}

#[test]
fn test_roman_chromatic_degrees() {
    assert_eq!(roman("Db", "C"), "♭II");
    assert_eq!(roman("Eb", "C"), "♭III");
    assert_eq!(roman("F#", "C"), "♯IV");
    assert_eq!(roman("Gb", "C"), "♯IV");
    assert_eq!(roman("Ab", "C"), "♭VI");
    assert_eq!(roman("Bb7", "C"), "♭VII7");
    assert_eq!(roman("Bbm", "C"), "♭vii");
}

#[test]
fn test_roman_uses_own_tonic_in_minor() {
    assert_eq!(roman("Am", "Am"), "i");
    assert_eq!(roman("C", "Am"), "♭III");
    assert_eq!(roman("E7", "Am"), "V7");
}

#[test]
fn test_roman_extensions_and_bass() {
    assert_eq!(roman("G7/B", "C"), "V7/B");
    assert_eq!(roman("Cmaj7", "C"), "Imaj7");
    assert_eq!(roman("Gsus4", "C"), "Vsus4");
    assert_eq!(roman("Eaug", "C"), "III+");
    assert_eq!(roman("C+7", "C"), "I+7");
    assert_eq!(roman("F#m7b5", "C"), "♯iv7b5");
}

#[test]
fn test_nashville_major_key() {
    assert_eq!(nns("C", "C"), "1");
    assert_eq!(nns("Dm7", "C"), "2-7");
    assert_eq!(nns("Am", "C"), "6-");
    assert_eq!(nns("G/B", "C"), "5/B");
    assert_eq!(nns("Bb", "C"), "♭7");
    assert_eq!(nns("Bdim", "C"), "7°");
    assert_eq!(nns("E", "E"), "1");
    assert_eq!(nns("B7", "E"), "57");
}

#[test]
fn test_nashville_minor_key_uses_relative_major() {
    // A minor numbers from C
    assert_eq!(nns("C", "Am"), "1");
    assert_eq!(nns("Am", "Am"), "6-");
    assert_eq!(nns("E7", "Am"), "37");
    // F minor numbers from Ab
    assert_eq!(nns("Fm", "Fm"), "6-");
    assert_eq!(nns("Db", "Fm"), "4");
}

#[test]
fn test_tonic_renders_as_first_degree() {
    for k in ["C", "Db", "F#", "Bb", "G"] {
        let tonic = key(k).tonic.to_string();
        assert_eq!(roman(&tonic, k), "I", "{}", k);
        assert_eq!(nns(&tonic, k), "1", "{}", k);
    }
}

#[test]
fn test_rest_renders_as_rest_everywhere() {
    for mode in [NotationMode::Standard, NotationMode::Roman, NotationMode::Nashville] {
        for k in ["C", "F#m", "Eb"] {
            assert_eq!(mode.render("-", &key(k)), "-");
        }
    }
}

#[test]
fn test_unparseable_and_numbers_unchanged() {
    for mode in [NotationMode::Standard, NotationMode::Roman, NotationMode::Nashville] {
        assert_eq!(mode.render("N.C.", &key("C")), "N.C.");
        assert_eq!(mode.render("6-", &key("C")), "6-");
        assert_eq!(mode.render("4", &key("G")), "4");
    }
}

#[test]
fn test_standard_is_identity() {
    for token in ["C", "F#m7/A", "Bbmaj9", "Gsus4", "C6/9", "Am7b5"] {
        assert_eq!(NotationMode::Standard.render(token, &key("D")), token);
    }
}

#[test]
fn test_standard_keeps_token_as_written() {
    assert_eq!(NotationMode::Standard.render("B♭m", &key("C")), "B♭m");
    assert_eq!(NotationMode::Standard.render("  F♯7/A♯ ", &key("C")), "F♯7/A♯");
    assert_eq!(NotationMode::Standard.render("", &key("C")), "-");
    assert_eq!(render_standard(&parse_chord("B♭m"), &key("C")), "Bbm");
}

#[test]
fn test_every_interval_has_a_degree() {
    let expected = [
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
    for (semitones, (roman, number)) in expected.iter().enumerate() {
        let interval = Interval::new(semitones as i32);
        assert_eq!(degree::roman_degree(interval), *roman);
        assert_eq!(degree::nashville_degree(interval), *number);
        assert_ne!(degree::roman_degree(interval), UNMAPPED);
    }
}

#[test]
fn test_notation_mode_from_str() {
    assert_eq!("roman".parse::<NotationMode>().unwrap(), NotationMode::Roman);
    assert_eq!("NNS".parse::<NotationMode>().unwrap(), NotationMode::Nashville);
    assert_eq!("standard".parse::<NotationMode>().unwrap(), NotationMode::Standard);
    assert!("tab".parse::<NotationMode>().is_err());
}

#[test]
fn test_key_label() {
    assert_eq!(NotationMode::Nashville.key_label(&key("Am")), "Am (1 = C)");
    assert_eq!(NotationMode::Nashville.key_label(&key("G")), "G");
    assert_eq!(NotationMode::Roman.key_label(&key("Am")), "Am");
}
