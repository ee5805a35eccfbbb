// output_writer.rs
use std::io::{self, Write};

/// Writes tokens one per line, escaping bytes that would break the layout.
pub struct TokenWriter<W: Write> {
    writer: W,
    offsets: bool,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(writer: W, offsets: bool) -> Self {
        Self { writer, offsets }
    }

    /// `offset` is where the token starts in the file; printed only when the
    /// writer was built with offsets on.
    pub fn write_token(&mut self, offset: Option<u64>, token: &[u8]) -> io::Result<()> {
        if self.offsets {
            match offset {
                Some(off) => write!(self.writer, "{off}\t")?,
                None => self.writer.write_all(b"?\t")?,
            }
        }
        self.write_escaped(token)?;
        self.writer.write_all(b"\n")
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    fn write_escaped(&mut self, bytes: &[u8]) -> io::Result<()> {
        for &b in bytes {
            match b {
                b'"' | b'\'' => self.writer.write_all(&[b])?,
                _ => {
                    for e in std::ascii::escape_default(b) {
                        self.writer.write_all(&[e])?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(offsets: bool, tokens: &[(Option<u64>, &[u8])]) -> String {
        let mut out = Vec::new();
        let mut w = TokenWriter::new(&mut out, offsets);
        for (off, tok) in tokens {
            w.write_token(*off, tok).unwrap();
        }
        w.flush().unwrap();
        drop(w);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_tokens() {
        assert_eq!(render(false, &[(Some(0), &b"hi"[..]), (Some(3), &b""[..])]), "hi\n\n");
    }

    #[test]
    fn offsets_prefix() {
        assert_eq!(
            render(true, &[(Some(0), &b"hi"[..]), (None, &b"x"[..])]),
            "0\thi\n?\tx\n"
        );
    }

    #[test]
    fn escapes_control_and_high_bytes() {
        assert_eq!(
            render(false, &[(None, &b"a\tb\n\xff\\\"'"[..])]),
            "a\\tb\\n\\xff\\\\\"'\n"
        );
    }
}
