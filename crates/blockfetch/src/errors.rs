//! The error type shared by every reader in this crate.

/// A failed read, skip, or pop.
///
/// Every variant except [`FetchError::Internal`] is an ordinary control-flow
/// signal ("no more data yet", "ask for less"). A call that fails never
/// changes the state of the reader it was made on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The reader had no unread bytes left before the call was made.
    #[error("End of stream.")]
    EndOfStream,
    /// More bytes were requested than the reader currently holds.
    #[error("Out of range. Requested {requested} bytes, but only {available} remaining.")]
    OutOfRange { requested: usize, available: usize },
    /// A negative amount was passed.
    #[error("Invalid argument: {name} must not be negative, got {value}.")]
    InvalidArgument { name: &'static str, value: i128 },
    /// An internal invariant was broken. This is a bug in this crate.
    #[error("Internal inconsistency: {0}")]
    Internal(&'static str),
}

impl FetchError {
    /// Returns true if the caller can recover from this error by supplying
    /// more data or asking for less.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FetchError::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
