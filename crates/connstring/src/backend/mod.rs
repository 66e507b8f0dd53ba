//! Seam between the parser and the types it allocates.
//!
//! A [`ParseCtx`] hands out the cursor, the two token buffers and the result
//! map. [`RustContext`] is the default; other contexts can swap any of them.

mod rust;

use crate::{
    error::{AllocError, MapError, TokenError, ViewError},
    text::Text,
};

pub use rust::RustContext;

/// Scratch buffer a [`Cursor`] writes tokens into.
pub trait TokenBuf {
    /// Replaces the contents with `token`.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot grow to hold `token`.
    fn overwrite(&mut self, token: &[u8]) -> Result<(), AllocError>;

    /// Read-only view of the contents.
    ///
    /// # Errors
    ///
    /// Fails when the contents cannot be presented as `&str`.
    fn view(&self) -> Result<&str, ViewError>;

    /// Whether the buffer holds zero bytes.
    fn is_empty(&self) -> bool;
}

/// Stateful scanning position within an input.
pub trait Cursor {
    /// Consumes a run of `delimiter` bytes, returning how many were skipped.
    fn skip_delimiters(&mut self, delimiter: u8) -> usize;

    /// Writes the run up to the next `delimiter` into `out`.
    ///
    /// # Errors
    ///
    /// [`TokenError::Exhausted`] once no input remains, or
    /// [`TokenError::Alloc`] if `out` cannot hold the token.
    fn next_token_into<B: TokenBuf + ?Sized>(
        &mut self,
        delimiter: u8,
        out: &mut B,
    ) -> Result<(), TokenError>;
}

/// Destination for parsed pairs.
pub trait Mapping {
    /// Inserts `key` if absent.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate key, a filtered entry, or allocation failure.
    fn add(&mut self, key: &str, value: &str) -> Result<(), MapError>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the mapping has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Factory for everything one parse owns.
///
/// Each constructor is fallible so a context can refuse any stage of setup.
/// Whatever a constructor hands out is owned by the parse and released by
/// dropping it.
pub trait ParseCtx {
    /// Cursor bound to one input.
    type Cursor<'src>: Cursor;
    /// Key and value scratch buffer.
    type Buf: TokenBuf;
    /// Result container.
    type Map: Mapping;

    /// Creates a cursor at the start of `input`.
    ///
    /// # Errors
    ///
    /// Fails if the cursor cannot be allocated.
    fn new_cursor<'src>(&mut self, input: &'src Text) -> Result<Self::Cursor<'src>, AllocError>;

    /// Creates an empty token buffer.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot be allocated.
    fn new_buf(&mut self) -> Result<Self::Buf, AllocError>;

    /// Creates an empty result map.
    ///
    /// # Errors
    ///
    /// Fails if the map cannot be allocated.
    fn new_map(&mut self) -> Result<Self::Map, AllocError>;
}
