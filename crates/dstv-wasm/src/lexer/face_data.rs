//! Recognizer for composite "face + numeric payload" lines.
//!
//! A face-data line starts with a face letter and continues with numerals,
//! some of which carry a one-letter suffix:
//!
//! ```text
//!   v   1000.00u    60.00    22.00l   50.00   0.00
//! ```
//!
//! Here `u` is an attached secondary face letter, `l` marks a slotted hole
//! whose length (`50.00`) and angle (`0.00`) follow the diameter.

use super::numeral::{is_numeral, parse_numeral, split_letter_suffix};
use super::token::{Face, FaceData, HoleModifier, HoleType};

/// Returns `true` if the line is a single face-data record.
///
/// The first word must be a bare face letter or a face letter immediately
/// followed by a numeral; every later word must be a numeral optionally
/// followed by one face or hole-type letter. At most one attached face
/// letter may appear on the line. A second standalone face letter means the
/// line holds several records and is rejected.
pub fn is_face_data_line(line: &str) -> bool {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };
    let Some((_, lead)) = split_lead(first) else {
        return false;
    };

    let mut attached_faces = usize::from(lead.is_some_and(|(_, suffix)| suffix.is_some()));
    for word in words {
        match classify_payload_word(word) {
            Some(PayloadWord::Plain | PayloadWord::HoleSuffix) => {}
            Some(PayloadWord::FaceSuffix) => attached_faces += 1,
            None => return false,
        }
    }

    attached_faces <= 1
}

/// Decodes a face-data line.
///
/// Returns `None` if [`is_face_data_line`] rejects the line. Never panics.
pub fn parse_face_data_line(line: &str) -> Option<FaceData> {
    if !is_face_data_line(line) {
        return None;
    }

    let mut words = line.split_whitespace();
    let (face, lead) = split_lead(words.next()?)?;

    let mut values = Vec::new();
    if let Some((numeral, _)) = lead {
        values.push(parse_numeral(numeral)?);
    }

    let mut hole_type = None;
    while let Some(word) = words.next() {
        let Some((numeral, letter)) = split_letter_suffix(word) else {
            values.push(parse_numeral(word)?);
            continue;
        };
        values.push(parse_numeral(numeral)?);
        hole_type = match HoleModifier::from_letter(letter) {
            Some(HoleModifier::Slotted) => {
                let length = words.next().and_then(word_value).unwrap_or(0.0);
                let angle = words.next().and_then(word_value).unwrap_or(0.0);
                Some(HoleType::Slotted { length, angle })
            }
            Some(HoleModifier::Countersunk) => Some(HoleType::Countersunk),
            Some(HoleModifier::Threaded) => Some(HoleType::Threaded),
            Some(HoleModifier::Marked) => Some(HoleType::Marked),
            None => hole_type,
        };
    }

    Some(FaceData {
        face,
        values,
        hole_type,
    })
}

/// Numeric value of a payload word, ignoring any one-letter suffix.
pub fn word_value(word: &str) -> Option<f64> {
    split_letter_suffix(word).map_or_else(
        || parse_numeral(word),
        |(numeral, _)| parse_numeral(numeral),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadWord {
    Plain,
    FaceSuffix,
    HoleSuffix,
}

fn classify_payload_word(word: &str) -> Option<PayloadWord> {
    if is_numeral(word) {
        return Some(PayloadWord::Plain);
    }
    let (_, letter) = split_letter_suffix(word)?;
    if Face::from_letter(letter).is_some() {
        Some(PayloadWord::FaceSuffix)
    } else if HoleModifier::from_letter(letter).is_some() {
        Some(PayloadWord::HoleSuffix)
    } else {
        None
    }
}

type AttachedNumeral<'a> = Option<(&'a str, Option<Face>)>;

/// Splits the first word into its face letter and an optional attached
/// numeral (itself optionally carrying a face suffix).
fn split_lead(word: &str) -> Option<(Face, AttachedNumeral<'_>)> {
    let letter = word.chars().next()?;
    let face = Face::from_letter(letter)?;
    let rest = word.get(letter.len_utf8()..)?;
    if rest.is_empty() {
        return Some((face, None));
    }
    if is_numeral(rest) {
        return Some((face, Some((rest, None))));
    }
    let (numeral, suffix) = split_letter_suffix(rest)?;
    let suffix_face = Face::from_letter(suffix)?;
    Some((face, Some((numeral, Some(suffix_face)))))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_values(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "value count: {actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "expected {e}, got {a}");
        }
    }

    #[test]
    fn ut_fd_001_plain_hole_line() {
        let data = parse_face_data_line("  v   100.00u    50.00    22.00    0.00");
        assert!(data.is_some(), "hole line should be accepted");
        if let Some(data) = data {
            assert_eq!(data.face, Face::Web);
            assert_values(&data.values, &[100.0, 50.0, 22.0, 0.0]);
            assert_eq!(data.hole_type, None);
        }
    }

    #[test]
    fn ut_fd_002_slotted_hole_consumes_two_fields() {
        let data = parse_face_data_line("o 250.00u 40.00 18.00l 60.00 45.00");
        assert!(data.is_some(), "slotted hole line should be accepted");
        if let Some(data) = data {
            assert_eq!(data.face, Face::Top);
            assert_values(&data.values, &[250.0, 40.0, 18.0]);
            assert_eq!(
                data.hole_type,
                Some(HoleType::Slotted {
                    length: 60.0,
                    angle: 45.0
                })
            );
        }
    }

    #[test]
    fn ut_fd_003_attached_lead_numeral_is_first_value() {
        let data = parse_face_data_line("v100.00 50.00 22.00");
        assert!(data.is_some());
        if let Some(data) = data {
            assert_values(&data.values, &[100.0, 50.0, 22.0]);
        }
    }

    #[test]
    fn ut_fd_004_countersunk_suffix_sets_hole_type() {
        let data = parse_face_data_line("u 10 20 14s");
        assert!(data.is_some());
        if let Some(data) = data {
            assert_eq!(data.face, Face::Bottom);
            assert_eq!(data.hole_type, Some(HoleType::Countersunk));
            assert_values(&data.values, &[10.0, 20.0, 14.0]);
        }
    }

    #[test]
    fn ut_fd_005_bare_face_letter_is_accepted() {
        let data = parse_face_data_line("h");
        assert!(data.is_some());
        if let Some(data) = data {
            assert_eq!(data.face, Face::Front);
            assert!(data.values.is_empty());
        }
    }

    #[test]
    fn bc_fd_001_second_standalone_face_rejects_line() {
        assert!(!is_face_data_line("v 100.00 o 50.00"));
        assert!(!is_face_data_line("v o"));
    }

    #[test]
    fn bc_fd_002_two_attached_faces_reject_line() {
        assert!(!is_face_data_line("v 2.00u 3.00o 0.00"));
        assert!(is_face_data_line("v 2.00u 3.00 0.00"));
    }

    #[test]
    fn bc_fd_003_text_payload_rejects_line() {
        assert!(!is_face_data_line("v 2.00u 2.00 0.00 10rF1000"));
        assert!(parse_face_data_line("v 2.00u 2.00 0.00 10rF1000").is_none());
    }

    #[test]
    fn bc_fd_004_non_face_start_rejects_line() {
        assert!(!is_face_data_line("100.00 50.00 0.00"));
        assert!(!is_face_data_line("V 100.00"));
        assert!(!is_face_data_line("x 100.00"));
        assert!(!is_face_data_line(""));
    }

    #[test]
    fn bc_fd_005_truncated_slot_fields_default_to_zero() {
        let data = parse_face_data_line("v 10 20 18l");
        assert!(data.is_some());
        if let Some(data) = data {
            assert_eq!(
                data.hole_type,
                Some(HoleType::Slotted {
                    length: 0.0,
                    angle: 0.0
                })
            );
        }
    }

    #[test]
    fn reserialized_record_reparses_to_same_face_and_count() {
        let lines = [
            "v 100.00u 50.00 22.00 0.00",
            "o 250.00u 40.00 18.00l 60.00 45.00",
            "u 10 20 14s 8",
            "h 0 0",
            "v",
        ];
        for line in lines {
            let first = parse_face_data_line(line);
            assert!(first.is_some(), "{line} should be accepted");
            let Some(first) = first else {
                continue;
            };
            let rendered = first.to_string();
            let second = parse_face_data_line(&rendered);
            assert!(second.is_some(), "re-serialized `{rendered}` rejected");
            if let Some(second) = second {
                assert_eq!(second.face, first.face);
                assert_eq!(second.values.len(), first.values.len());
                assert_eq!(second.hole_type, first.hole_type);
            }
        }
    }

    #[test]
    fn word_value_strips_suffix() {
        assert_eq!(word_value("2.00u"), Some(2.0));
        assert_eq!(word_value("7"), Some(7.0));
        assert_eq!(word_value("abc"), None);
        assert!((word_value("18.5l").unwrap_or(0.0) - 18.5).abs() < EPSILON);
    }
}
