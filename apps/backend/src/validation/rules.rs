//! Small predicates used by `Validate` implementations.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Non-empty after trimming whitespace.
pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Digits with an optional leading sign and at most one decimal point.
pub fn numeric(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let frac = parts.next();
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match frac {
        None => all_digits(whole),
        Some(frac) => all_digits(whole) && all_digits(frac),
    }
}

pub fn boolean(value: &str) -> bool {
    matches!(
        value,
        "1" | "0" | "t" | "f" | "T" | "F" | "true" | "false" | "TRUE" | "FALSE" | "True" | "False"
    )
}

/// Length in characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn max_chars(value: &str, max: usize) -> bool {
    char_len(value) <= max
}

pub fn min_chars(value: &str, min: usize) -> bool {
    char_len(value) >= min
}
