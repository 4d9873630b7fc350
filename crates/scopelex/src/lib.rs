//! A streaming, scope-based tokenizer.
//!
//! A [`Grammar`] is a set of named scopes. Each scope lists symbols to
//! ignore and symbols to emit, and a symbol may switch the active scope when
//! it matches. A [`Tokenizer`] pulls bytes from a [`Document`], decodes
//! them as UTF-8 one codepoint at a time, and turns them into a
//! [`ParseResult`]: the tokens in input order plus one message per lexical
//! error.
//!
//! ```rust
//! use scopelex::{Grammar, Matcher, Symbol, Tokenizer};
//!
//! let mut builder = Grammar::builder();
//! builder
//!     .scope("main", true)?
//!     .ignore("main", Symbol::new("space", Matcher::char(' ')))?
//!     .symbol("main", Symbol::new("number", Matcher::numeric()))?;
//! let tokenizer = Tokenizer::new(builder.build());
//!
//! let result = block_on(tokenizer.parse_str("1 22 #"))?;
//! assert!(result.is_success());
//! assert_eq!(result.tokens().len(), 3);
//! assert_eq!(result.errors(), ["Unexpected character '#' at position 5"]);
//! # fn block_on<F: core::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "tokio"))]
extern crate std;

mod decoder;
mod document;
mod error;
mod grammar;
mod matcher;
mod options;
mod token;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use decoder::{ReadResult, Utf8Decoder};
#[cfg(feature = "tokio")]
pub use document::ReaderDocument;
pub use document::{ChunkedDocument, Document, SliceDocument};
pub use error::{GrammarError, OutOfRange, TokenizeError};
pub use grammar::{Grammar, GrammarBuilder, Scope, Symbol};
pub use matcher::{Block, Literal, Matcher, Numeric, Predicate};
pub use options::TokenizerOptions;
pub use token::{InvalidToken, ParseResult, SymbolToken, Token, TokenKind};
pub use tokenizer::Tokenizer;
