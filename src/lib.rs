//! Buffered sequential file reading with byte and token granularity.
//!
//! [`BufferedFileReader`] owns one file handle and a [`BUF_SIZE`] byte buffer.
//! Bytes come out one at a time with [`get_char`](BufferedFileReader::get_char),
//! or grouped into tokens split on a delimiter set with
//! [`get_token`](BufferedFileReader::get_token). Running out of input, read
//! errors and a missing file all show up as `None` and a false
//! [`good`](BufferedFileReader::good), never as a panic.
//!
//! ```no_run
//! use buffered_file_reader::BufferedFileReader;
//!
//! let mut reader = BufferedFileReader::new("words.txt");
//! while let Some(token) = reader.next_token() {
//!     println!("{}", String::from_utf8_lossy(&token));
//! }
//! ```
//!
//! [`SimpleFileReader`] is the unbuffered counterpart.

pub mod delims;
pub mod error;
mod reader;
mod simple;

pub use error::{Error, Result};
pub use reader::{BufferedFileReader, Tokens, BUF_SIZE};
pub use simple::SimpleFileReader;
