use crate::{
    backend::{Cursor, Mapping, ParseCtx, TokenBuf},
    error::{AllocError, MapError, TokenError, ViewError},
    map::{Map, MapFilter},
    text::Text,
    tokenizer::Tokenizer,
};

/// Context producing the crate's own [`Tokenizer`], [`Text`] and [`Map`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RustContext {
    filter: Option<MapFilter>,
}

impl RustContext {
    /// A context whose maps refuse entries for which `filter` returns
    /// `false`.
    #[must_use]
    pub fn with_filter(filter: MapFilter) -> Self {
        Self {
            filter: Some(filter),
        }
    }
}

impl ParseCtx for RustContext {
    type Cursor<'src> = Tokenizer<'src>;
    type Buf = Text;
    type Map = Map;

    fn new_cursor<'src>(&mut self, input: &'src Text) -> Result<Tokenizer<'src>, AllocError> {
        Ok(Tokenizer::new(input))
    }

    fn new_buf(&mut self) -> Result<Text, AllocError> {
        Ok(Text::new())
    }

    fn new_map(&mut self) -> Result<Map, AllocError> {
        Ok(match self.filter {
            Some(filter) => Map::with_filter(filter),
            None => Map::new(),
        })
    }
}

impl TokenBuf for Text {
    fn overwrite(&mut self, token: &[u8]) -> Result<(), AllocError> {
        self.copy_n(token, token.len())
    }

    fn view(&self) -> Result<&str, ViewError> {
        self.to_str()
    }

    fn is_empty(&self) -> bool {
        Text::is_empty(self)
    }
}

impl Cursor for Tokenizer<'_> {
    fn skip_delimiters(&mut self, delimiter: u8) -> usize {
        self.skip(delimiter)
    }

    fn next_token_into<B: TokenBuf + ?Sized>(
        &mut self,
        delimiter: u8,
        out: &mut B,
    ) -> Result<(), TokenError> {
        let token = self.next_token(delimiter).ok_or(TokenError::Exhausted)?;
        out.overwrite(token)?;
        Ok(())
    }
}

impl Mapping for Map {
    fn add(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        Map::add(self, key, value)
    }

    fn len(&self) -> usize {
        Map::len(self)
    }
}
