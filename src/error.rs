//! Error types for the virtual memory manager.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::translation::{FrameNumber, PageNumber};

#[derive(Error, Debug)]
pub enum Error {
    #[error("usage: {0}")]
    Usage(String),

    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O fault loading page {page} from backing store: {reason}")]
    IoFault { page: PageNumber, reason: FaultReason },

    #[error("page {page} is already mapped to frame {current}, refusing to remap to {requested}")]
    Remap {
        page: PageNumber,
        current: FrameNumber,
        requested: FrameNumber,
    },

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Why a page could not be brought in from the backing store.
#[derive(Error, Debug)]
pub enum FaultReason {
    #[error("seek failed: {0}")]
    Seek(#[source] io::Error),

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("short read, got {got} of {expected} bytes")]
    ShortRead { got: usize, expected: usize },
}

/// An address line that is not a decimal integer. Non-fatal: the reader
/// substitutes address 0 and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {text:?} is not a decimal address, using 0")]
pub struct ParseWarning {
    pub line: usize,
    pub text: String,
}

pub type Result<T> = std::result::Result<T, Error>;
