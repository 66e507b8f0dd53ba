//! Delimiter-driven scanning cursor.
//!
//! The cursor borrows the input and only ever moves forward. A token is the
//! byte run between the current position and the next occurrence of the
//! requested delimiter; the delimiter is consumed and excluded. When the
//! delimiter does not occur again, the rest of the input is the final
//! token. A cursor sitting at the end of input is exhausted and yields no
//! token, so an empty input yields nothing at all.

use bstr::{BStr, ByteSlice};

use crate::text::Text;

/// Forward-only cursor over borrowed bytes.
#[derive(Debug, Clone)]
pub struct Tokenizer<'src> {
    input: &'src [u8],
    pos: usize,
}

impl<'src> Tokenizer<'src> {
    /// Starts scanning at the beginning of `input`.
    #[must_use]
    pub fn new(input: &'src Text) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    /// Starts scanning at the beginning of `input`.
    #[must_use]
    pub fn from_bytes(input: &'src [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the run up to the next `delimiter`, consuming the delimiter.
    ///
    /// Returns `None` only when the cursor is exhausted. An immediately
    /// following delimiter yields an empty token.
    pub fn next_token(&mut self, delimiter: u8) -> Option<&'src BStr> {
        let rest = self.input.get(self.pos..).filter(|rest| !rest.is_empty())?;
        match rest.find_byte(delimiter) {
            Some(end) => {
                self.pos += end + 1;
                Some(rest[..end].as_bstr())
            }
            None => {
                self.pos = self.input.len();
                Some(rest.as_bstr())
            }
        }
    }

    /// Consumes a run of `delimiter` bytes and returns how many were skipped.
    pub fn skip(&mut self, delimiter: u8) -> usize {
        let skipped = self.remaining().iter().take_while(|&&b| b == delimiter).count();
        self.pos += skipped;
        skipped
    }

    /// Unscanned input.
    #[must_use]
    pub fn remaining(&self) -> &'src BStr {
        self.input[self.pos..].as_bstr()
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether no input remains.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    fn tokens(input: &str, delimiter: u8) -> Vec<&str> {
        let mut cursor = Tokenizer::from_bytes(input.as_bytes());
        let mut out = Vec::new();
        while let Some(token) = cursor.next_token(delimiter) {
            out.push(token.to_str().unwrap());
        }
        out
    }

    #[rstest]
    #[case::empty("", &[])]
    #[case::single("abc", &["abc"])]
    #[case::trailing("abc;", &["abc"])]
    #[case::pair("a;b", &["a", "b"])]
    #[case::leading(";a", &["", "a"])]
    #[case::doubled("a;;b", &["a", "", "b"])]
    #[case::only_delimiters(";;", &["", ""])]
    fn splits_on_delimiter(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(tokens(input, b';'), expected);
    }

    #[test]
    fn alternating_delimiters() {
        let mut cursor = Tokenizer::from_bytes(b"key1=value1;key2=value2");
        assert_eq!(cursor.next_token(b'='), Some("key1".as_bytes().as_bstr()));
        assert_eq!(cursor.next_token(b';'), Some("value1".as_bytes().as_bstr()));
        assert_eq!(cursor.next_token(b'='), Some("key2".as_bytes().as_bstr()));
        assert_eq!(cursor.next_token(b';'), Some("value2".as_bytes().as_bstr()));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next_token(b'='), None);
    }

    #[test]
    fn value_delimiter_does_not_split_keys() {
        let mut cursor = Tokenizer::from_bytes(b"a=b=c;d");
        assert_eq!(cursor.next_token(b'='), Some(b"a".as_bstr()));
        assert_eq!(cursor.next_token(b';'), Some(b"b=c".as_bstr()));
        assert_eq!(cursor.remaining(), b"d".as_bstr());
    }

    #[test]
    fn exhausted_after_trailing_delimiter() {
        let mut cursor = Tokenizer::from_bytes(b"key1=");
        assert_eq!(cursor.next_token(b'='), Some(b"key1".as_bstr()));
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.next_token(b';'), None);
    }

    #[test]
    fn skip_consumes_only_the_run() {
        let mut cursor = Tokenizer::from_bytes(b";;;a;");
        assert_eq!(cursor.skip(b';'), 3);
        assert_eq!(cursor.skip(b';'), 0);
        assert_eq!(cursor.remaining(), b"a;".as_bstr());
    }

    #[test]
    fn input_is_not_mutated() {
        let text = Text::from("a=b");
        let mut cursor = Tokenizer::new(&text);
        while cursor.next_token(b'=').is_some() {}
        assert_eq!(text, "a=b");
    }
}
