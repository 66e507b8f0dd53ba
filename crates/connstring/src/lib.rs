//! Parser for `key=value;key=value` connection strings.
//!
//! ```rust
//! use connstring::{Text, parse};
//!
//! let raw = Text::from("HostName=hub.example.net;DeviceId=dev-01;SharedAccessKey=c2VjcmV0");
//! let map = parse(Some(&raw)).unwrap();
//! assert_eq!(map.get("DeviceId"), Some("dev-01"));
//!
//! assert!(parse(Some(&Text::from("=value1"))).is_err());
//! assert!(parse(None).is_err());
//! ```
//!
//! The parser owns a cursor, two scratch buffers and the result map while it
//! runs; all of them come from a [`backend::ParseCtx`], which is the seam for
//! swapping in other buffer or map types.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod backend;
mod error;
mod map;
mod options;
mod parser;
mod text;
mod tokenizer;


pub use error::{AllocError, MapError, ParseError, TokenError, ViewError};
pub use map::{Map, MapFilter};
pub use options::ParserOptions;
pub use parser::{ConnectionStringParser, Pair, Pairs, parse, parse_str};
pub use text::Text;
pub use tokenizer::Tokenizer;
