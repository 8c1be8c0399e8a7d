//! Percent-encoding and form parsing (RFC 3986 / RFC 5849 Section 3.6).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str};

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986.
///
/// Everything outside the unreserved set is encoded with upper-case hex,
/// including `!*'()` and space (`%20`, never `+`).
pub fn percent_encode(input: &str) -> String {
    percent_encoding::percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Decode one `application/x-www-form-urlencoded` name or value.
///
/// `+` decodes to a space. Malformed escapes are kept verbatim.
pub fn decode_form_component(input: &str) -> String {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Parse a query string or form body into decoded `(name, value)` pairs.
///
/// Order and duplicates are preserved. A segment without `=` is a name with
/// an empty value; empty segments are skipped.
pub fn parse_form_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_form_component(name), decode_form_component(value))
        })
        .collect()
}

/// Encode pairs as `name=value` joined by `&`.
pub(crate) fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", percent_encode(name), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
