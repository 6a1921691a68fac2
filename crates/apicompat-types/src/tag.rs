//! Field tag micro-syntax
//!
//! A tag is a space separated list of `key:"value"` entries. The key is a
//! bareword running up to the colon; the value is a double quoted string with
//! backslash escapes. Parsing stops quietly at the first malformed entry.

use std::collections::BTreeMap;

/// Parse every `key:"value"` entry of a tag into a map of unquoted values.
///
/// A repeated key keeps its last value. A value whose escapes do not decode
/// maps to the empty string.
pub fn parse_tags(tag: &str) -> BTreeMap<String, String> {
    let mut all = BTreeMap::new();
    let mut rest = tag.as_bytes();

    loop {
        while let [b' ', tail @ ..] = rest {
            rest = tail;
        }
        if rest.is_empty() {
            break;
        }

        // a space or a quote before the colon is a syntax error
        let i = rest
            .iter()
            .position(|&b| b == b' ' || b == b':' || b == b'"')
            .unwrap_or(rest.len());
        if i + 1 >= rest.len() || rest[i] != b':' || rest[i + 1] != b'"' {
            break;
        }
        let key = &rest[..i];
        rest = &rest[i + 1..];

        let mut j = 1;
        while j < rest.len() && rest[j] != b'"' {
            if rest[j] == b'\\' {
                j += 1;
            }
            j += 1;
        }
        if j >= rest.len() {
            break;
        }
        let quoted = &rest[..=j];
        rest = &rest[j + 1..];

        // both slices end on ASCII boundaries, so they are valid UTF-8
        let key = String::from_utf8_lossy(key).into_owned();
        let value = std::str::from_utf8(quoted)
            .ok()
            .and_then(unquote)
            .unwrap_or_default();
        all.insert(key, value);
    }

    all
}

/// Decode a double quoted string literal, including its quotes.
pub fn unquote(quoted: &str) -> Option<String> {
    let body = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let esc = chars.next()?;
                match esc {
                    'a' => out.push('\u{07}'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0C}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'v' => out.push('\u{0B}'),
                    '\\' | '"' | '\'' => out.push(esc),
                    'x' => out.push(hex_escape(&mut chars, 2)?),
                    'u' => out.push(hex_escape(&mut chars, 4)?),
                    'U' => out.push(hex_escape(&mut chars, 8)?),
                    '0'..='7' => {
                        let mut value = esc.to_digit(8)?;
                        for _ in 0..2 {
                            value = value * 8 + chars.next()?.to_digit(8)?;
                        }
                        if value > 0xFF {
                            return None;
                        }
                        out.push(char::from_u32(value)?);
                    }
                    _ => return None,
                }
            }
            _ => out.push(c),
        }
    }

    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
