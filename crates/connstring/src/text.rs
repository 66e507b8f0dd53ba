//! Growable byte string used both as parser input and as token scratch.
//!
//! A [`Text`] holds raw bytes rather than a `String`: connection strings
//! arrive from environment variables and config files where valid UTF-8 is
//! not guaranteed. The UTF-8 check is deferred to [`Text::to_str`], which is
//! the only fallible read.

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::{BStr, BString, ByteSlice};

use crate::error::{AllocError, ViewError};

/// A growable string value.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    bytes: BString,
}

impl Text {
    /// Creates an empty text without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with the first `n` bytes of `src`.
    ///
    /// `n` is clamped to `src.len()`. Existing capacity is reused, so a
    /// buffer overwritten once per token only grows to fit the longest one.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the buffer cannot grow. The previous
    /// contents are cleared in that case.
    pub fn copy_n(&mut self, src: &[u8], n: usize) -> Result<(), AllocError> {
        let src = &src[..n.min(src.len())];
        let buf: &mut Vec<u8> = &mut self.bytes;
        buf.clear();
        buf.try_reserve(src.len())?;
        buf.extend_from_slice(src);
        Ok(())
    }

    /// Returns the contents as `&str`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the bytes are not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, ViewError> {
        Ok(self.bytes.to_str()?)
    }

    /// Raw contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Contents as a byte string slice.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.bytes.as_bstr()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the text has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Truncates to zero length, keeping capacity.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self {
            bytes: BString::from(s),
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self {
            bytes: BString::from(s),
        }
    }
}

impl From<&[u8]> for Text {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: BString::from(bytes),
        }
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: BString::from(bytes),
        }
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Text {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::*;

    #[test]
    fn copy_n_overwrites_previous_contents() {
        let mut text = Text::from("previous-long-token");
        text.copy_n(b"key1=value1", 4).unwrap();
        assert_eq!(text, "key1");
        assert_eq!(text.len(), 4);
    }

    #[test]
    fn copy_n_clamps_to_source_length() {
        let mut text = Text::new();
        text.copy_n(b"abc", 10).unwrap();
        assert_eq!(text, "abc");
    }

    #[test]
    fn copy_n_reuses_capacity() {
        let mut text = Text::new();
        text.copy_n(b"a-fairly-long-token", 19).unwrap();
        let cap = text.bytes.capacity();
        text.copy_n(b"short", 5).unwrap();
        assert_eq!(text.bytes.capacity(), cap);
    }

    #[test]
    fn to_str_reports_invalid_prefix() {
        let text = Text::from(vec![b'o', b'k', 0xff, b'x']);
        assert_eq!(text.to_str(), Err(ViewError { valid_up_to: 2 }));
    }

    #[test]
    fn empty_text_views_as_empty_str() {
        let text = Text::new();
        assert!(text.is_empty());
        assert_eq!(text.to_str(), Ok(""));
    }

    #[test]
    fn equality_across_representations() {
        let text = Text::from("Endpoint=sb://x");
        assert_eq!(text, Text::from(String::from("Endpoint=sb://x")));
        assert_eq!(text, *"Endpoint=sb://x");
        assert_eq!(text, *b"Endpoint=sb://x".as_slice());
        assert_ne!(text, Text::from("endpoint=sb://x"));
    }

    #[test]
    fn display_escapes_nothing_for_utf8() {
        assert_eq!(format!("{}", Text::from("a=b")), "a=b");
        assert_eq!(format!("{:?}", Text::from("a=b")), "\"a=b\"");
    }
}
