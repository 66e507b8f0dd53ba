//! Connection string parser.
//!
//! Parsing is a pull loop over a [`Pairs`] sequence. `Pairs` owns the cursor
//! and the two scratch buffers, so every exit from the loop releases them by
//! drop. The result map is a local of [`ConnectionStringParser::parse`] until
//! it is returned, so any `?` inside the loop destroys it before the scratch
//! state.
//!
//! Setup order is cursor, key buffer, value buffer, map. Teardown on failure
//! runs in reverse: map, value buffer, key buffer, cursor.

use alloc::string::String;

use tracing::{debug, trace};

use crate::{
    Map,
    backend::{Cursor, Mapping, ParseCtx, RustContext, TokenBuf},
    error::{AllocError, ParseError, TokenError},
    map::copy_str,
    options::ParserOptions,
    text::Text,
};

/// Parses `connection_string` with default options.
///
/// # Errors
///
/// See [`ConnectionStringParser::parse`].
pub fn parse(connection_string: Option<&Text>) -> Result<Map, ParseError> {
    ConnectionStringParser::new().parse(connection_string)
}

/// Parses a `&str` connection string with default options.
///
/// # Errors
///
/// See [`ConnectionStringParser::parse`].
///
/// # Examples
///
/// ```rust
/// let map = connstring::parse_str("Endpoint=sb://ns.example;SharedAccessKeyName=root;").unwrap();
/// assert_eq!(map.get("SharedAccessKeyName"), Some("root"));
/// assert_eq!(map.len(), 2);
/// ```
pub fn parse_str(connection_string: &str) -> Result<Map, ParseError> {
    parse(Some(&Text::from(connection_string)))
}

/// One owned `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Non-empty key.
    pub key: String,
    /// Value, possibly empty.
    pub value: String,
}

/// Parses `key=value;` sequences into a map produced by `C`.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStringParser<C: ParseCtx = RustContext> {
    ctx: C,
    options: ParserOptions,
}

impl ConnectionStringParser {
    /// A parser with default options and the default context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser with `options` and the default context.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            ctx: RustContext::default(),
            options,
        }
    }
}

impl<C: ParseCtx> ConnectionStringParser<C> {
    /// A parser drawing its cursor, buffers and map from `ctx`.
    pub fn with_context(ctx: C, options: ParserOptions) -> Self {
        Self { ctx, options }
    }

    /// The context.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Consumes the parser, returning its context.
    pub fn into_context(self) -> C {
        self.ctx
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parses every pair in `connection_string` into a new map.
    ///
    /// An empty input, or one holding only pair delimiters, yields an empty
    /// map. The last value may end at end of input or at a pair delimiter.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidInput`] when `connection_string` is `None`;
    ///   nothing is allocated in that case.
    /// - [`ParseError::ResourceExhausted`] when the context or the map
    ///   cannot allocate.
    /// - [`ParseError::MalformedSequence`] when a key has no value.
    /// - [`ParseError::EmptyKey`] when a key is empty.
    /// - [`ParseError::InvalidView`] when a key or value is not UTF-8.
    /// - [`ParseError::RejectedKey`] when the map refuses a pair.
    ///
    /// No partially filled map is ever returned.
    pub fn parse(&mut self, connection_string: Option<&Text>) -> Result<C::Map, ParseError> {
        let Some(input) = connection_string else {
            debug!("connection string is absent");
            return Err(ParseError::InvalidInput);
        };
        debug!(len = input.len(), "parsing connection string");

        let mut pairs = self.pairs(input)?;
        let mut map = self.ctx.new_map().inspect_err(|_| {
            debug!("failed to allocate result map");
        })?;

        while let Some(pair) = pairs.next_pair() {
            let (key, value) = pair.inspect_err(|err| debug!(%err, "connection string rejected"))?;
            if let Err(err) = map.add(key, value) {
                debug!(key, %err, "map refused pair");
                return Err(err.into());
            }
            trace!(key, "added pair");
        }

        debug!(pairs = map.len(), "parsed connection string");
        Ok(map)
    }

    /// Starts a lazy scan over `input`.
    ///
    /// # Errors
    ///
    /// [`ParseError::ResourceExhausted`] if the cursor or a buffer cannot be
    /// allocated. Anything allocated before the failure is released.
    pub fn pairs<'src>(&mut self, input: &'src Text) -> Result<Pairs<'src, C>, ParseError> {
        Pairs::new(&mut self.ctx, input, self.options).map_err(|err| {
            debug!(%err, "failed to set up scan");
            err.into()
        })
    }
}

/// Lazy, finite, fused sequence of pairs pulled from one input.
///
/// The key and value scratch buffers are overwritten on every step.
/// [`Pairs::next_pair`] lends views into them; the [`Iterator`] impl copies
/// each pair out. Once a step fails or the cursor is exhausted the sequence
/// ends.
pub struct Pairs<'src, C: ParseCtx> {
    // Field order is drop order.
    value: C::Buf,
    key: C::Buf,
    cursor: C::Cursor<'src>,
    options: ParserOptions,
    finished: bool,
}

impl<'src, C: ParseCtx> Pairs<'src, C> {
    fn new(ctx: &mut C, input: &'src Text, options: ParserOptions) -> Result<Self, AllocError> {
        let cursor = ctx.new_cursor(input)?;
        let key = ctx.new_buf()?;
        let value = ctx.new_buf()?;
        Ok(Self {
            value,
            key,
            cursor,
            options,
            finished: false,
        })
    }

    /// Scans the next pair, returning views into the scratch buffers.
    pub fn next_pair(&mut self) -> Option<Result<(&str, &str), ParseError>> {
        if self.finished {
            return None;
        }
        if self.options.skip_empty_pairs {
            self.cursor.skip_delimiters(self.options.pair_delimiter);
        }

        match self
            .cursor
            .next_token_into(self.options.key_delimiter, &mut self.key)
        {
            Ok(()) => {}
            Err(TokenError::Exhausted) => {
                self.finished = true;
                return None;
            }
            Err(TokenError::Alloc(err)) => {
                self.finished = true;
                return Some(Err(err.into()));
            }
        }

        if let Err(err) = self
            .cursor
            .next_token_into(self.options.pair_delimiter, &mut self.value)
        {
            self.finished = true;
            return Some(Err(match err {
                TokenError::Exhausted => ParseError::MalformedSequence,
                TokenError::Alloc(err) => err.into(),
            }));
        }

        let key = match self.key.view() {
            Ok(_) if self.key.is_empty() => {
                self.finished = true;
                return Some(Err(ParseError::EmptyKey));
            }
            Ok(key) => key,
            Err(err) => {
                self.finished = true;
                return Some(Err(err.into()));
            }
        };
        let value = match self.value.view() {
            Ok(value) => value,
            Err(err) => {
                self.finished = true;
                return Some(Err(err.into()));
            }
        };
        Some(Ok((key, value)))
    }

    /// Whether the sequence has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<C: ParseCtx> Iterator for Pairs<'_, C> {
    type Item = Result<Pair, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.next_pair()?.and_then(|(key, value)| {
            Ok(Pair {
                key: copy_str(key)?,
                value: copy_str(value)?,
            })
        });
        if pair.is_err() {
            self.finished = true;
        }
        Some(pair)
    }
}

impl<C: ParseCtx> core::iter::FusedIterator for Pairs<'_, C> {}
