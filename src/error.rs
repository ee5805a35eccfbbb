use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type local to this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported escape sequence '{0}' in delimiters")]
    InvalidEscape(String),

    #[error("delimiter set is empty")]
    EmptyDelimiters,
}
