//! Numeral recognition shared by the lexer and the decoders.
//!
//! A numeral is an optionally signed integer or decimal (`1`, `1.`, `.5`,
//! `-1.5`) with an optional exponent (`1.5e-3`).

/// Returns `true` if `word` is a complete numeral.
pub fn is_numeral(word: &str) -> bool {
    numeral_prefix_len(word) == Some(word.len())
}

/// Parses a complete numeral.
pub fn parse_numeral(word: &str) -> Option<f64> {
    if is_numeral(word) {
        word.parse::<f64>().ok()
    } else {
        None
    }
}

/// Splits a word into a numeral and a single trailing ASCII letter.
///
/// Returns `None` unless the word is exactly a numeral followed by one
/// lowercase letter (the letter is not validated here).
pub fn split_letter_suffix(word: &str) -> Option<(&str, char)> {
    let letter = word.chars().last()?;
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let numeral = word.get(..word.len() - letter.len_utf8())?;
    is_numeral(numeral).then_some((numeral, letter))
}

/// Length in bytes of the longest numeral at the start of `word`, if any.
///
/// The exponent is only consumed when it is followed by at least one digit,
/// so `2e` scans as `2`.
pub fn numeral_prefix_len(word: &str) -> Option<usize> {
    let bytes = word.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(bytes, pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(bytes, pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(bytes, exp_pos);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    Some(pos)
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}
