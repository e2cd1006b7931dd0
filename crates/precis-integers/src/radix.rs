//! Text codec for magnitudes in bases 2 through 62.
//!
//! Digits are `0-9`, then `a-z`, then `A-Z`. Up to base 36 letters are
//! read case-insensitively and written in lowercase. Above base 36 case is
//! significant: `a-z` are 10..=35 and `A-Z` are 36..=61.

use dashu::integer::UBig;

use crate::bits::low_u64;
use crate::error::{NumError, NumResult};

/// Smallest supported base.
pub const MIN_BASE: u32 = 2;

/// Largest supported base.
pub const MAX_BASE: u32 = 62;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Rejects bases outside `2..=62`.
///
/// # Errors
///
/// Returns [`NumError::UnsupportedBase`] for any other base.
pub fn check_base(base: u32) -> NumResult<()> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(NumError::UnsupportedBase(base))
    }
}

/// Value of the digit `c` in `base`, if it is one.
#[must_use]
pub fn digit_value(c: u8, base: u32) -> Option<u32> {
    let value = match c {
        b'0'..=b'9' => u32::from(c - b'0'),
        b'a'..=b'z' => u32::from(c - b'a') + 10,
        b'A'..=b'Z' if base <= 36 => u32::from(c - b'A') + 10,
        b'A'..=b'Z' => u32::from(c - b'A') + 36,
        _ => return None,
    };
    (value < base).then_some(value)
}

/// The character for digit value `value` (must be below 62).
#[must_use]
pub fn digit_char(value: u8) -> char {
    char::from(ALPHABET[usize::from(value)])
}

/// Splits an optional leading sign off `text`.
///
/// Returns `(negative, rest)`.
#[must_use]
pub fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

/// The largest power of `base` that fits in a `u64`, with its digit count.
fn chunk(base: u32) -> (u64, usize) {
    let base = u64::from(base);
    let mut power = base;
    let mut width = 1;
    while let Some(next) = power.checked_mul(base) {
        power = next;
        width += 1;
    }
    (power, width)
}

/// Digit values of `n` in `base`, most significant first.
///
/// Zero yields a single `0` digit.
#[must_use]
pub fn to_digits(n: &UBig, base: u32) -> Vec<u8> {
    if n.is_zero() {
        return vec![0];
    }
    let (power, width) = chunk(base);
    let divisor = UBig::from(power);
    let base = u64::from(base);

    // Peel off word-sized chunks, least significant first.
    let mut digits = Vec::new();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let mut word = low_u64(&(&rest % &divisor));
        rest = rest / &divisor;
        let mut produced = 0;
        while word > 0 || (produced < width && !rest.is_zero()) {
            digits.push((word % base) as u8);
            word /= base;
            produced += 1;
        }
    }
    digits.reverse();
    digits
}

/// Renders digit values produced by [`to_digits`].
#[must_use]
pub fn render(digits: &[u8]) -> String {
    digits.iter().map(|&d| digit_char(d)).collect()
}

/// Formats `n` in `base` without a sign.
#[must_use]
pub fn format_magnitude(n: &UBig, base: u32) -> String {
    render(&to_digits(n, base))
}

/// Parses an unsigned digit string in `base`.
///
/// Returns `None` if `text` is empty or contains a character that is not a
/// digit of `base`.
#[must_use]
pub fn parse_magnitude(text: &str, base: u32) -> Option<UBig> {
    if text.is_empty() {
        return None;
    }
    let (_, width) = chunk(base);
    let wide_base = u64::from(base);
    let mut acc = UBig::ZERO;
    for piece in text.as_bytes().chunks(width) {
        let mut word = 0u64;
        for &c in piece {
            word = word * wide_base + u64::from(digit_value(c, base)?);
        }
        let scale = wide_base.pow(piece.len() as u32);
        acc = acc * UBig::from(scale) + UBig::from(word);
    }
    Some(acc)
}
