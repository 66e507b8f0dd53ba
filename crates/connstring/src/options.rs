/// Configuration for [`ConnectionStringParser`](crate::ConnectionStringParser).
///
/// # Examples
///
/// ```rust
/// use connstring::{ConnectionStringParser, ParserOptions, Text};
///
/// let mut parser = ConnectionStringParser::with_options(ParserOptions {
///     pair_delimiter: b'&',
///     ..Default::default()
/// });
/// let map = parser.parse(Some(&Text::from("a=1&b=2"))).unwrap();
/// assert_eq!(map.get("b"), Some("2"));
/// ```
///
/// # Default
///
/// `=` between key and value, `;` between pairs, empty pairs skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Byte that ends a key.
    ///
    /// # Default
    ///
    /// `b'='`
    pub key_delimiter: u8,

    /// Byte that ends a value.
    ///
    /// # Default
    ///
    /// `b';'`
    pub pair_delimiter: u8,

    /// Whether runs of pair delimiters before a key are consumed.
    ///
    /// When `true`, `a=1;;b=2`, `;a=1` and `a=1;;` all parse. When `false`
    /// the text between two adjacent pair delimiters is scanned as a key, so
    /// only a single trailing delimiter is tolerated.
    ///
    /// # Default
    ///
    /// `true`
    pub skip_empty_pairs: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            key_delimiter: b'=',
            pair_delimiter: b';',
            skip_empty_pairs: true,
        }
    }
}
