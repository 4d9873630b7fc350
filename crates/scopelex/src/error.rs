use alloc::string::String;

use bstr::BString;
use thiserror::Error;

/// Returned by [`Document::next_byte`](crate::Document::next_byte) when every
/// requested byte has already been consumed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no requested byte left to consume")]
pub struct OutOfRange;

/// A fatal error that aborts a [`Tokenizer::parse`](crate::Tokenizer::parse)
/// call.
///
/// Lexical problems are never reported here; they become
/// [`InvalidToken`](crate::InvalidToken)s in the result.
#[derive(Error, Debug, PartialEq)]
pub enum TokenizeError<E> {
    /// The document's read primitive failed.
    #[error("document read failed: {0}")]
    Document(E),
    /// A byte was consumed that the document never delivered.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    /// A multi-byte sequence was cut short by the end of input.
    #[error("malformed UTF-8 sequence {bytes:?} at byte {offset}: expected {expected} bytes")]
    MalformedSequence {
        /// Byte offset of the lead byte.
        offset: u64,
        /// Sequence length announced by the lead byte.
        expected: usize,
        /// The bytes that did arrive.
        bytes: BString,
    },
    /// A byte that cannot start a UTF-8 sequence.
    #[error("invalid UTF-8 lead byte 0x{byte:02X} at byte {offset}")]
    InvalidLeadByte {
        /// Byte offset of the offending byte.
        offset: u64,
        /// The offending byte.
        byte: u8,
    },
    /// A byte inside a multi-byte sequence that is not of the form
    /// `10xxxxxx`.
    #[error("invalid UTF-8 continuation in {bytes:?} at byte {offset}")]
    InvalidContinuation {
        /// Byte offset of the lead byte.
        offset: u64,
        /// The sequence up to and including the offending byte.
        bytes: BString,
    },
    /// A sequence longer than the shortest encoding of its value.
    #[error("overlong UTF-8 encoding of U+{value:04X} at byte {offset}")]
    OverlongEncoding {
        /// Byte offset of the lead byte.
        offset: u64,
        /// The assembled value.
        value: u32,
    },
    /// A sequence that decodes to a surrogate or a value above U+10FFFF.
    #[error("invalid codepoint U+{value:X} at byte {offset}")]
    InvalidCodepoint {
        /// Byte offset of the lead byte.
        offset: u64,
        /// The assembled value.
        value: u32,
    },
    /// A symbol switched to a scope the grammar does not declare.
    #[error("transition to undeclared scope '{0}'")]
    UndeclaredScope(String),
}

/// A grammar registration mistake, reported while the grammar is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("scope '{0}' is declared twice")]
    DuplicateScope(String),
    #[error("scope '{second}' cannot be the default, '{first}' already is")]
    DuplicateDefault { first: String, second: String },
    #[error("symbol added to undeclared scope '{0}'")]
    UnknownScope(String),
    #[error("block delimiters must not be empty")]
    EmptyDelimiter,
    #[error("symbol kind must not be empty")]
    EmptyKind,
}
