//! Unbuffered reader: every byte costs one read on the handle.
//!
//! Kept as a baseline next to [`BufferedFileReader`](crate::BufferedFileReader).
//! Same open/close/good/tell/rewind contracts, no buffer to keep in sync.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};

pub struct SimpleFileReader<R = File> {
    handle: Option<R>,
    ready: bool,
}

impl<R> Default for SimpleFileReader<R> {
    fn default() -> Self {
        Self {
            handle: None,
            ready: false,
        }
    }
}

impl SimpleFileReader<File> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let mut reader = Self::default();
        reader.open(path);
        reader
    }

    pub fn open<P: AsRef<Path>>(&mut self, path: P) {
        if let Err(e) = self.try_open(path) {
            debug!("{e}");
        }
    }

    pub fn try_open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.close();
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.handle = Some(file);
        self.ready = true;
        Ok(())
    }
}

impl<R> SimpleFileReader<R> {
    pub fn from_handle(handle: R) -> Self {
        Self {
            handle: Some(handle),
            ready: true,
        }
    }

    pub fn close(&mut self) {
        self.handle = None;
        self.ready = false;
    }

    pub fn good(&self) -> bool {
        self.ready && self.handle.is_some()
    }
}

impl<R: Read> SimpleFileReader<R> {
    pub fn get_char(&mut self) -> Option<u8> {
        let mut c = [0u8; 1];
        match self.get_into(&mut c) {
            1 => Some(c[0]),
            _ => None,
        }
    }

    /// Reads up to `n` bytes in a single read.
    ///
    /// Fewer than `n` bytes means end of file was reached: the bytes are
    /// returned and the reader stops being [`good`](Self::good).
    pub fn get_chars(&mut self, n: usize) -> Option<Vec<u8>> {
        if !self.good() {
            return None;
        }
        if n == 0 {
            return Some(Vec::new());
        }

        let mut out = vec![0u8; n];
        let got = self.get_into(&mut out);
        if got == 0 {
            return None;
        }
        if got < n {
            self.ready = false;
        }
        out.truncate(got);
        Some(out)
    }

    fn get_into(&mut self, buf: &mut [u8]) -> usize {
        if !self.ready {
            return 0;
        }
        let Some(handle) = self.handle.as_mut() else {
            return 0;
        };
        match handle.read(buf) {
            Ok(0) => {
                self.ready = false;
                0
            }
            Ok(n) => n,
            Err(e) => {
                warn!("read failed, treating as end of file: {e}");
                self.ready = false;
                0
            }
        }
    }
}

impl<R: Seek> SimpleFileReader<R> {
    pub fn tell(&mut self) -> Option<u64> {
        self.handle.as_mut()?.stream_position().ok()
    }

    pub fn rewind(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            self.ready = handle.seek(SeekFrom::Start(0)).is_ok();
        }
    }
}
