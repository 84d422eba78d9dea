use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Lowercases and collapses every run of non `[a-z0-9]` characters into `_`.
///
/// Used for product translation keys (`product.<slug>`) and cart identities.
pub fn slugify(input: &str) -> String {
    NON_ALNUM
        .replace_all(&input.to_lowercase(), "_")
        .into_owned()
}

/// Parses the leading integer of a string the way a lenient form parser would:
/// surrounding whitespace is skipped, a sign is honoured, parsing stops at the
/// first non-digit. `"1,200"` yields `1`, `"abc"` yields `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Returns the part of an email address before `@`, or the whole input.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
