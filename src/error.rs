//! Error types for ferry sessions and transfers.

use thiserror::Error;

/// Everything that can go wrong inside one session. Errors never cross
/// session boundaries; the dispatcher logs them and keeps accepting.
#[derive(Debug, Error)]
pub enum Error {
    /// Bind, connect, or accept failure. Fatal for the process.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Malformed or short protocol read. Aborts the current session only.
    #[error("framing error: {0}")]
    Framing(String),

    /// Missing, unreadable, or uncreatable file.
    #[error("file access: {0}")]
    FileAccess(String),

    /// Mid-stream I/O failure. The partial file is retained.
    #[error("transfer aborted: {0}")]
    Aborted(String),

    /// Out-of-range catalog selection. No transfer is performed.
    #[error("invalid file index: {0}")]
    InvalidIndex(String),

    /// Plain I/O error where none of the above adds anything.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
