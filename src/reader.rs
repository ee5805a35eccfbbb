//! Buffered sequential reader over a single owned file handle.
//!
//! All reads go through a fixed [`BUF_SIZE`] byte buffer. The handle is only
//! touched when the buffer is exhausted, when the position is queried, or on
//! rewind. End of file and read errors both leave the reader not
//! [`good`](BufferedFileReader::good); reads then return `None`.

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::mem;
use std::path::Path;

use log::{debug, trace, warn};

use crate::delims::WHITESPACE;
use crate::error::{Error, Result};

/// Capacity of the internal buffer, and the most a single refill will read.
pub const BUF_SIZE: usize = 1024;

/// Reads a file one byte or one token at a time through an internal buffer.
///
/// # Invariants
///
/// - `pos <= len <= BUF_SIZE`.
/// - With no handle, `len == pos == 0` and `ready == false`.
/// - The handle's physical position is exactly `len - pos` bytes ahead of the
///   logical one. Nothing else may seek the handle while this reader owns it.
///
/// The reader is move-only. Moving it moves the buffer, cursors and handle
/// together; [`take`](Self::take) and [`transfer_from`](Self::transfer_from)
/// do the same out of a place that must stay usable, leaving the source closed.
pub struct BufferedFileReader<R = File> {
    handle: Option<R>,
    buffer: [u8; BUF_SIZE],
    /// Bytes populated by the last fill.
    len: usize,
    /// Next unconsumed byte in `buffer`.
    pos: usize,
    ready: bool,
}

impl<R> Default for BufferedFileReader<R> {
    /// A reader with no file open.
    fn default() -> Self {
        Self {
            handle: None,
            buffer: [0u8; BUF_SIZE],
            len: 0,
            pos: 0,
            ready: false,
        }
    }
}

impl BufferedFileReader<File> {
    /// Opens `path` for reading from the start.
    ///
    /// A path that cannot be opened yields a closed reader; check
    /// [`good`](Self::good) or use [`try_open`](Self::try_open) for the cause.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let mut reader = Self::default();
        reader.open(path);
        reader
    }

    /// Closes the current file, if any, and opens `path` in its place.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) {
        if let Err(e) = self.try_open(path) {
            debug!("{e}");
        }
    }

    /// Same as [`open`](Self::open), but reports why the open failed.
    pub fn try_open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.close();
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened {}", path.display());
        self.attach(file);
        Ok(())
    }
}

impl<R> BufferedFileReader<R> {
    /// Wraps an already open handle, reading from its current position.
    pub fn from_handle(handle: R) -> Self {
        let mut reader = Self::default();
        reader.attach(handle);
        reader
    }

    fn attach(&mut self, handle: R) {
        self.handle = Some(handle);
        self.len = 0;
        self.pos = 0;
        self.ready = true;
    }

    /// Releases the handle. Calling this on a closed reader does nothing.
    pub fn close(&mut self) {
        if self.handle.take().is_some() {
            debug!("closed file handle");
        }
        self.len = 0;
        self.pos = 0;
        self.ready = false;
    }

    /// `true` while a file is open and neither end of file nor a read error
    /// has been hit.
    pub fn good(&self) -> bool {
        self.ready && self.handle.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Moves everything out into a new reader and leaves `self` closed.
    ///
    /// The returned reader continues exactly where `self` was; dropping
    /// `self` afterwards performs no I/O.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Closes whatever `self` owns, then takes over `other`'s file, buffer
    /// and position. `other` is left closed.
    pub fn transfer_from(&mut self, other: &mut Self) {
        self.close();
        *self = other.take();
    }
}

impl<R: Read> BufferedFileReader<R> {
    /// Refills the buffer with one read of up to [`BUF_SIZE`] bytes.
    ///
    /// A short read is fine; only a zero-byte read means end of file.
    fn fill_buffer(&mut self) {
        self.pos = 0;
        let Some(handle) = self.handle.as_mut() else {
            self.len = 0;
            self.ready = false;
            return;
        };

        match handle.read(&mut self.buffer) {
            Ok(0) => {
                trace!("end of file");
                self.len = 0;
                self.ready = false;
            }
            Ok(n) => {
                trace!("buffered {n} bytes");
                self.len = n;
                self.ready = true;
            }
            Err(e) => {
                warn!("read failed, treating as end of file: {e}");
                self.len = 0;
                self.ready = false;
            }
        }
    }

    /// Returns the next byte without consuming it.
    pub fn peek_char(&mut self) -> Option<u8> {
        if !self.good() {
            return None;
        }
        if self.pos >= self.len {
            self.fill_buffer();
            if self.len == 0 {
                return None;
            }
        }
        Some(self.buffer[self.pos])
    }

    /// Returns the next byte, or `None` at end of file or with no file open.
    pub fn get_char(&mut self) -> Option<u8> {
        let c = self.peek_char()?;
        self.pos += 1;
        Some(c)
    }

    /// Reads the next token ended by any byte in `delims` or by end of file.
    ///
    /// The delimiter is consumed but not returned. A delimiter straight away
    /// gives an empty token; `None` means there was nothing left to read.
    ///
    /// ```
    /// use buffered_file_reader::BufferedFileReader;
    /// use std::io::Cursor;
    ///
    /// let mut r = BufferedFileReader::from_handle(Cursor::new(b"a,,b".to_vec()));
    /// assert_eq!(r.get_token(b",").as_deref(), Some(&b"a"[..]));
    /// assert_eq!(r.get_token(b",").as_deref(), Some(&b""[..]));
    /// assert_eq!(r.get_token(b",").as_deref(), Some(&b"b"[..]));
    /// assert_eq!(r.get_token(b","), None);
    /// ```
    pub fn get_token(&mut self, delims: &[u8]) -> Option<Vec<u8>> {
        // End of file before the first byte is "no token", not an empty one.
        self.peek_char()?;

        let mut token = Vec::new();
        loop {
            let window = &self.buffer[self.pos..self.len];
            match window.iter().position(|b| delims.contains(b)) {
                Some(i) => {
                    token.extend_from_slice(&window[..i]);
                    self.pos += i + 1;
                    return Some(token);
                }
                None => {
                    token.extend_from_slice(window);
                    self.pos = self.len;
                    if self.peek_char().is_none() {
                        return Some(token);
                    }
                }
            }
        }
    }

    /// [`get_token`](Self::get_token) split on [`WHITESPACE`].
    pub fn next_token(&mut self) -> Option<Vec<u8>> {
        self.get_token(WHITESPACE)
    }

    /// Iterates over the remaining tokens.
    pub fn tokens<'a>(&'a mut self, delims: &'a [u8]) -> Tokens<'a, R> {
        Tokens {
            reader: self,
            delims,
        }
    }
}

impl<R: Seek> BufferedFileReader<R> {
    /// Offset of the next byte [`get_char`](Self::get_char) would return.
    ///
    /// `None` with no file open or if the handle cannot report its position.
    pub fn tell(&mut self) -> Option<u64> {
        let handle = self.handle.as_mut()?;
        match handle.stream_position() {
            Ok(physical) => Some(physical - (self.len - self.pos) as u64),
            Err(e) => {
                warn!("position query failed: {e}");
                None
            }
        }
    }

    /// Starts reading again from the first byte of the file.
    ///
    /// Does nothing with no file open. Clears end of file.
    pub fn rewind(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        self.len = 0;
        self.pos = 0;
        match handle.seek(SeekFrom::Start(0)) {
            Ok(_) => {
                debug!("rewound to start");
                self.ready = true;
            }
            Err(e) => {
                warn!("rewind failed: {e}");
                self.ready = false;
            }
        }
    }
}

impl<R> Drop for BufferedFileReader<R> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<R> fmt::Debug for BufferedFileReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedFileReader")
            .field("open", &self.handle.is_some())
            .field("len", &self.len)
            .field("pos", &self.pos)
            .field("ready", &self.ready)
            .finish()
    }
}

/// Iterator returned by [`BufferedFileReader::tokens`].
pub struct Tokens<'a, R> {
    reader: &'a mut BufferedFileReader<R>,
    delims: &'a [u8],
}

impl<R: Read> Iterator for Tokens<'_, R> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.get_token(self.delims)
    }
}
