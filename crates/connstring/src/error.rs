use alloc::collections::TryReserveError;

use thiserror::Error;

/// Why a connection string produced no map.
///
/// Variants name the failure class only. None of them carries the key or
/// value that triggered it, so an error can be logged without exposing
/// credentials.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No connection string was supplied.
    #[error("connection string is absent")]
    InvalidInput,
    /// Allocating the cursor, a token buffer, the map or a map entry failed.
    #[error("resource exhausted while parsing connection string")]
    ResourceExhausted,
    /// A key was found with no value after it.
    #[error("key without a value")]
    MalformedSequence,
    /// A key token had zero length.
    #[error("empty key")]
    EmptyKey,
    /// The map refused the pair (duplicate key or filtered entry).
    #[error("key rejected by the map")]
    RejectedKey,
    /// A token buffer could not produce a string view of its contents.
    #[error("token is not valid UTF-8")]
    InvalidView,
}

/// An allocation could not be satisfied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("allocation failed")]
pub struct AllocError;

impl From<TryReserveError> for AllocError {
    fn from(_: TryReserveError) -> Self {
        Self
    }
}

/// A [`Text`](crate::Text) could not be viewed as `&str`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid UTF-8 after {valid_up_to} bytes")]
pub struct ViewError {
    /// Length of the longest valid UTF-8 prefix.
    pub valid_up_to: usize,
}

impl From<bstr::Utf8Error> for ViewError {
    fn from(err: bstr::Utf8Error) -> Self {
        Self {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Failure to pull the next token from a cursor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Nothing remains between the cursor and the end of input.
    #[error("cursor exhausted")]
    Exhausted,
    /// The target buffer could not hold the token.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Failure to insert into a [`Map`](crate::Map).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The key is already present.
    #[error("duplicate key")]
    DuplicateKey,
    /// The map's filter refused the entry.
    #[error("entry rejected by filter")]
    Rejected,
    /// Copying the entry into the map failed.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl From<AllocError> for ParseError {
    fn from(_: AllocError) -> Self {
        Self::ResourceExhausted
    }
}

impl From<ViewError> for ParseError {
    fn from(_: ViewError) -> Self {
        Self::InvalidView
    }
}

impl From<MapError> for ParseError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::DuplicateKey | MapError::Rejected => Self::RejectedKey,
            MapError::Alloc(_) => Self::ResourceExhausted,
        }
    }
}
