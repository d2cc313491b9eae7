//! Value cleansing.
//!
//! Applied in order:
//! 1. coerce the value to text (`Empty` becomes `""`)
//! 2. drop everything outside printable ASCII (`0x20..=0x7E`)
//! 3. keep only letters, digits, whitespace and `@ . - _ ,`
//! 4. trim surrounding whitespace
//! 5. NFKC normalization
//!
//! The output alphabet is closed under every step, so cleansing is
//! idempotent.

use merger_model::RawValue;
use unicode_normalization::UnicodeNormalization;

/// Punctuation kept by [`is_allowed_char`].
const ALLOWED_PUNCTUATION: [char; 5] = ['@', '.', '-', '_', ','];

/// Printable ASCII: space through tilde.
pub fn is_printable_ascii(c: char) -> bool {
    matches!(c, '\x20'..='\x7E')
}

/// Letters, digits, whitespace and the allowed punctuation.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Cleanses any raw cell value.
pub fn cleanse(value: &RawValue) -> String {
    match value {
        RawValue::Text(text) => cleanse_str(text),
        RawValue::Empty => String::new(),
        other => cleanse_str(&other.to_string()),
    }
}

/// Cleanses text.
pub fn cleanse_str(value: &str) -> String {
    let filtered: String = value
        .chars()
        .filter(|&c| is_printable_ascii(c) && is_allowed_char(c))
        .collect();
    filtered.trim().nfkc().collect()
}
