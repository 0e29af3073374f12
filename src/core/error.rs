//! Error types shared by the catalog core.
//!
//! The CLI wraps these in `anyhow` with extra context; library callers can
//! match on the variant to tell a malformed PO file from an undecodable
//! source file.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::MessageKey;

pub type Result<T, E = PoError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PoError {
    /// Malformed PO grammar. Fatal for the whole file.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Bytes that cannot be decoded with the declared (or default) encoding,
    /// or text that cannot be represented in the requested output encoding.
    #[error("{}: cannot convert {encoding} text: {message}", path.display())]
    Encoding {
        path: PathBuf,
        encoding: String,
        message: String,
    },

    #[error("unknown encoding: {label}")]
    UnknownEncoding { label: String },

    /// Strict insertion of a second, different entry under an existing key.
    #[error("duplicate message definition: {key}")]
    DuplicateKey { key: MessageKey },

    #[error("{}: {message}", path.display())]
    Scanner { path: PathBuf, message: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PoError {
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        PoError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PoError::Io {
            path: path.into(),
            source,
        }
    }
}
