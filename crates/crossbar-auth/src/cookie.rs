//! Cookie header parsing.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Parses a raw `Cookie` header into a name → value map.
///
/// Segments are split on `;`, then on the first `=`. Names are
/// whitespace-trimmed; values are trimmed and percent-decoded (invalid
/// UTF-8 sequences are replaced). Segments without an `=` are skipped, as
/// are segments whose trimmed name is empty. A missing header yields an
/// empty map, not an error.
pub fn parse_cookie_header(header: Option<&str>) -> HashMap<String, String> {
    let Some(raw) = header else {
        return HashMap::new();
    };

    raw.split(';')
        .filter_map(|segment| {
            let (name, value) = segment.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = percent_decode_str(value.trim())
                .decode_utf8_lossy()
                .into_owned();
            Some((name.to_string(), value))
        })
        .collect()
}
