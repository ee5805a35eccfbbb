//! Delimiter sets for token reads.

use crate::error::{Error, Result};

/// Default delimiters: space, tab, newline, carriage return, vertical tab and
/// form feed.
pub const WHITESPACE: &[u8] = b" \t\n\r\x0b\x0c";

/// Parses a delimiter set given on the command line.
///
/// Plain characters stand for their own UTF-8 bytes. The escapes `\t`, `\n`,
/// `\r`, `\v`, `\f`, `\s` (space), `\\` and `\xHH` name bytes that are awkward
/// to type in a shell. Repeated bytes are kept once, in first-seen order.
pub fn parse_delims(spec: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut chars = spec.chars();
    let mut utf8 = [0u8; 4];

    while let Some(c) = chars.next() {
        if c != '\\' {
            for &b in c.encode_utf8(&mut utf8).as_bytes() {
                push_unique(&mut out, b);
            }
            continue;
        }

        let b = match chars.next() {
            Some('t') => b'\t',
            Some('n') => b'\n',
            Some('r') => b'\r',
            Some('v') => 0x0b,
            Some('f') => 0x0c,
            Some('s') => b' ',
            Some('\\') => b'\\',
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                if hex.len() != 2 {
                    return Err(Error::InvalidEscape(format!("\\x{hex}")));
                }
                u8::from_str_radix(&hex, 16)
                    .map_err(|_| Error::InvalidEscape(format!("\\x{hex}")))?
            }
            Some(other) => return Err(Error::InvalidEscape(format!("\\{other}"))),
            None => return Err(Error::InvalidEscape("\\".to_string())),
        };
        push_unique(&mut out, b);
    }

    if out.is_empty() {
        return Err(Error::EmptyDelimiters);
    }
    Ok(out)
}

fn push_unique(set: &mut Vec<u8>, b: u8) {
    if !set.contains(&b) {
        set.push(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_set() {
        assert_eq!(WHITESPACE.len(), 6);
        for b in [b' ', b'\t', b'\n', b'\r', 0x0b, 0x0c] {
            assert!(WHITESPACE.contains(&b));
        }
    }

    #[test]
    fn plain_and_escaped() {
        assert_eq!(parse_delims(",").unwrap(), b",");
        assert_eq!(parse_delims(",\\n\\s").unwrap(), b",\n ");
        assert_eq!(parse_delims("\\t\\v\\f\\r").unwrap(), b"\t\x0b\x0c\r");
        assert_eq!(parse_delims("\\\\").unwrap(), b"\\");
        assert_eq!(parse_delims("\\x2c\\x00").unwrap(), b",\0");
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(parse_delims(",,;,\\x2c").unwrap(), b",;");
    }

    #[test]
    fn bad_input() {
        assert!(matches!(parse_delims(""), Err(Error::EmptyDelimiters)));
        assert!(matches!(parse_delims("\\q"), Err(Error::InvalidEscape(s)) if s == "\\q"));
        assert!(matches!(parse_delims("a\\"), Err(Error::InvalidEscape(_))));
        assert!(matches!(parse_delims("\\x4"), Err(Error::InvalidEscape(_))));
        assert!(matches!(parse_delims("\\xzz"), Err(Error::InvalidEscape(_))));
    }
}
