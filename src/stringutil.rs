//! Slicing helpers for loosely formatted page text

/// Text strictly between the first `open` and the first `close` after it.
///
/// Returns an empty string when either delimiter is missing.
pub fn substring_between(s: &str, open: char, close: char) -> &str {
    let Some(start) = s.find(open).map(|i| i + open.len_utf8()) else {
        return "";
    };
    match s[start..].find(close) {
        Some(len) => &s[start..start + len],
        None => "",
    }
}

/// Drop the leading run of non-alphabetic characters.
pub fn eat_until_alpha(s: &str) -> &str {
    match s.find(char::is_alphabetic) {
        Some(i) => &s[i..],
        None => "",
    }
}

/// Drop everything before the first ASCII digit.
pub fn eat_until_digit(s: &str) -> &str {
    match s.find(|c: char| c.is_ascii_digit()) {
        Some(i) => &s[i..],
        None => "",
    }
}

/// Split at the first `token` into trimmed `(before, after)`.
///
/// Returns `("", "")` when the token does not occur.
pub fn break_by_token(s: &str, token: char) -> (&str, &str) {
    match s.split_once(token) {
        Some((before, after)) => (before.trim(), after.trim()),
        None => ("", ""),
    }
}
