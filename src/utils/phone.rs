//! Phone number normalization and validation.

use std::sync::OnceLock;

use regex::Regex;

/// Phone numbers are stored as exactly 11 digits.
pub const PHONE_DIGITS: usize = 11;

fn non_digit() -> &'static Regex {
    static NON_DIGIT: OnceLock<Regex> = OnceLock::new();
    NON_DIGIT.get_or_init(|| Regex::new(r"\D").expect("static regex"))
}

/// Strip every non-digit character and truncate to 11 digits.
///
/// `"+7 (999) 123-45-67"` becomes `"79991234567"`.
pub fn normalize_phone(raw: &str) -> String {
    let digits = non_digit().replace_all(raw, "");
    digits.chars().take(PHONE_DIGITS).collect()
}

/// A normalized phone is valid iff it has exactly 11 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit())
}
