//! Text cleaning for extracted names
//!
//! Removes annotation groups such as `(Live)`, `[Official Video]`,
//! `{Remix}` and `"Nickname"`, and replaces characters that would break a
//! search URL. [`clean_field`] is idempotent.

/// Characters replaced with a space because they act as URL path/query separators
pub const UNSAFE_SEPARATORS: &[char] = &['/', '\\', '?', '#', '&', '+', '%'];

/// Remove every complete `(...)`, `{...}`, `[...]` and `"..."` group
///
/// Groups close at the first matching delimiter and do not nest; an opener
/// with no closer after it is kept. Surrounding whitespace is left alone.
pub fn strip_annotations(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        if let Some(close) = closing_delimiter(c) {
            if let Some(end) = after.find(close) {
                rest = &after[end + close.len_utf8()..];
                continue;
            }
        }
        out.push(c);
        rest = after;
    }

    out
}

/// Full cleaning pass: strip annotations, replace unsafe separators, collapse whitespace
pub fn clean_field(raw: &str) -> String {
    let stripped = strip_annotations(raw);
    let replaced: String = stripped
        .chars()
        .map(|c| if UNSAFE_SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        '"' => Some('"'),
        _ => None,
    }
}
