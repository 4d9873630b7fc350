use alloc::{string::String, sync::Arc, vec::Vec};
use core::fmt;

/// Either half of a [`Token`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Symbol,
    Invalid,
}

/// A lexeme recognised by a grammar symbol.
///
/// `position` and `length` count decoded codepoints, never bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolToken {
    position: u64,
    length: u64,
    kind: Arc<str>,
    text: String,
}

impl SymbolToken {
    #[must_use]
    pub fn new(position: u64, length: u64, kind: Arc<str>, text: String) -> Self {
        Self {
            position,
            length,
            kind,
            text,
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// The symbol's type tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A lexeme no symbol accepted, or one a symbol flagged as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidToken {
    position: u64,
    length: u64,
    text: String,
    message: String,
}

impl InvalidToken {
    #[must_use]
    pub fn new(position: u64, length: u64, text: String, message: String) -> Self {
        Self {
            position,
            length,
            text,
            message,
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One entry of a [`ParseResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    Symbol(SymbolToken),
    Invalid(InvalidToken),
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Symbol(_) => TokenKind::Symbol,
            Self::Invalid(_) => TokenKind::Invalid,
        }
    }

    /// Type tag of a symbol token; `None` for invalid tokens.
    #[must_use]
    pub fn symbol_kind(&self) -> Option<&str> {
        match self {
            Self::Symbol(t) => Some(t.kind()),
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        match self {
            Self::Symbol(t) => t.position,
            Self::Invalid(t) => t.position,
        }
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        match self {
            Self::Symbol(t) => t.length,
            Self::Invalid(t) => t.length,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Symbol(t) => &t.text,
            Self::Invalid(t) => &t.text,
        }
    }

    /// Returns `true` if the token is [`Invalid`](Self::Invalid).
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<SymbolToken> for Token {
    fn from(token: SymbolToken) -> Self {
        Self::Symbol(token)
    }
}

impl From<InvalidToken> for Token {
    fn from(token: InvalidToken) -> Self {
        Self::Invalid(token)
    }
}

/// `kind@position+length "text"`, with `!` as the kind of invalid tokens.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(t) => write!(f, "{}@{}+{} {:?}", t.kind, t.position, t.length, t.text),
            Self::Invalid(t) => write!(f, "!@{}+{} {:?}", t.position, t.length, t.text),
        }
    }
}

/// Aggregate outcome of one tokenizer run.
///
/// `is_success` is `true` whenever the run reached the end of input, even if
/// lexical errors were recorded along the way. Check
/// [`errors`](Self::errors) to learn whether the input was clean.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseResult {
    is_success: bool,
    tokens: Vec<Token>,
    errors: Vec<String>,
}

impl ParseResult {
    /// The run reached the end of input.
    #[must_use]
    pub fn success(tokens: Vec<Token>, errors: Vec<String>) -> Self {
        Self {
            is_success: true,
            tokens,
            errors,
        }
    }

    /// The run stopped before the end of input.
    #[must_use]
    pub fn fail(tokens: Vec<Token>, errors: Vec<String>) -> Self {
        Self {
            is_success: false,
            tokens,
            errors,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.is_success
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn into_parts(self) -> (bool, Vec<Token>, Vec<String>) {
        (self.is_success, self.tokens, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn accessors_cover_both_variants() {
        let sym = Token::from(SymbolToken::new(3, 2, Arc::from("number"), "42".into()));
        let bad = Token::from(InvalidToken::new(5, 1, "#".into(), "nope".into()));
        assert_eq!(sym.kind(), TokenKind::Symbol);
        assert_eq!(sym.symbol_kind(), Some("number"));
        assert_eq!((sym.position(), sym.length(), sym.text()), (3, 2, "42"));
        assert!(bad.is_invalid());
        assert_eq!(bad.symbol_kind(), None);
        assert_eq!((bad.position(), bad.length(), bad.text()), (5, 1, "#"));
    }

    #[test]
    fn display_is_compact() {
        let sym = Token::from(SymbolToken::new(0, 4, Arc::from("string"), "\"ab\"".into()));
        assert_eq!(sym.to_string(), r#"string@0+4 "\"ab\"""#);
        let bad = Token::from(InvalidToken::new(1, 1, "#".into(), "x".into()));
        assert_eq!(bad.to_string(), r##"!@1+1 "#""##);
    }

    #[test]
    fn success_survives_recorded_errors() {
        let result = ParseResult::success(vec![], vec!["oops".to_string()]);
        assert!(result.is_success());
        assert_eq!(result.errors(), ["oops"]);
        let (ok, tokens, errors) = ParseResult::fail(vec![], vec![]).into_parts();
        assert!(!ok);
        assert!(tokens.is_empty() && errors.is_empty());
    }
}
