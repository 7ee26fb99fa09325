//! Sanitization of untrusted request-path fragments.
//!
//! Request paths arrive percent/plus-encoded and may carry embedded NUL
//! bytes or `../` traversal sequences. Decoding never fails: the worst case
//! is an odd-looking but NUL-free, traversal-free string.

use tracing::warn;

/// Result of decoding a raw request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    /// The decoded, traversal-free path.
    pub path: String,

    /// Whether an embedded `%00` was found and dropped.
    pub embedded_nul: bool,
}

/// Decode and neutralize a raw request-path fragment.
///
/// Rules, applied left to right:
/// - `+` becomes a space.
/// - `%` followed by two hex digits decodes to that byte; `%00` is dropped
///   entirely and recorded as a diagnostic.
/// - `%` not followed by two hex digits passes through literally.
/// - Everything else is copied verbatim.
///
/// Afterwards the leftmost `../` is removed repeatedly until none remains,
/// so nested and adjacent traversal sequences are all eliminated.
pub fn decode(raw: &str) -> DecodedPath {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut embedded_nul = false;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                if bytes[i + 1] == b'0' && bytes[i + 2] == b'0' {
                    warn!("embedded NUL byte in request path: {}", raw);
                    embedded_nul = true;
                } else {
                    out.push(hex_value(bytes[i + 1]) * 16 + hex_value(bytes[i + 2]));
                }
                i += 3;
            }
            b'%' => {
                // Malformed escape, pass the % through untouched
                out.push(b'%');
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    let mut path = String::from_utf8_lossy(&out).into_owned();

    // Strip ../ so no request can escape the filesystem prefix
    while let Some(n) = path.find("../") {
        path.replace_range(n..n + 3, "");
    }

    DecodedPath { path, embedded_nul }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

// =============================================================================
// Tests
// =============================================================================
