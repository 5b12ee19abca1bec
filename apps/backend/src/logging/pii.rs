//! Masking of credentials and personal data before they reach a log line.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

const REDACTED_TOKEN: &str = "[REDACTED_TOKEN]";

// All patterns are vetted literals.
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Base64 or base64url runs of 16+ characters. Also covers hex runs.
#[allow(clippy::unwrap_used)]
static OPAQUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap());

/// Mask anything that looks like a credential or an email address.
///
/// JWT-shaped strings are removed whole; emails keep the first character of
/// the local part and the domain; other opaque runs of 16+ characters are
/// replaced.
pub fn redact(input: &str) -> String {
    let without_jwts = JWT.replace_all(input, REDACTED_TOKEN);

    let without_emails = EMAIL.replace_all(&without_jwts, |caps: &Captures| {
        let matched = &caps[0];
        match matched.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => matched.to_string(),
        }
    });

    OPAQUE_TOKEN
        .replace_all(&without_emails, REDACTED_TOKEN)
        .into_owned()
}

/// Truncate to at most `max` characters, marking the cut with `…`.
///
/// Never splits a character. Use together with [`redact`] when the input may
/// contain a credential.
pub fn bounded_preview(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        None => input.to_string(),
        Some((cut, _)) => format!("{}…", &input[..cut]),
    }
}

/// Displays the wrapped string with [`redact`] applied.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", redact(self.0))
    }
}
