//! Matchers: the rules a grammar symbol uses to recognise a lexeme.
//!
//! Every multi-codepoint matcher is a [`Predicate`]: `accept` decides, one
//! codepoint at a time, whether the candidate keeps growing, and `validate`
//! decides whether the finished candidate is a lexeme. Nothing is consumed
//! until `validate` agrees, so a rejected candidate costs no rollback.

use alloc::{string::String, sync::Arc};
use core::fmt;

use crate::error::GrammarError;

/// Capability pair behind predicate matchers.
pub trait Predicate: Send + Sync {
    /// Whether `ch` extends the candidate `text` accumulated so far.
    fn accept(&self, ch: char, text: &str) -> bool;

    /// Whether the finished candidate is a lexeme.
    fn validate(&self, text: &str) -> bool {
        !text.is_empty()
    }
}

struct FnPredicate<A, V> {
    accept: A,
    validate: V,
}

impl<A, V> Predicate for FnPredicate<A, V>
where
    A: Fn(char, &str) -> bool + Send + Sync,
    V: Fn(&str) -> bool + Send + Sync,
{
    fn accept(&self, ch: char, text: &str) -> bool {
        (self.accept)(ch, text)
    }

    fn validate(&self, text: &str) -> bool {
        (self.validate)(text)
    }
}

/// Identifier-like runs: ASCII alphanumerics, `_`, and anything above
/// U+007F.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Literal;

impl Literal {
    #[must_use]
    pub fn accepts(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || u32::from(ch) > 127
    }
}

impl Predicate for Literal {
    fn accept(&self, ch: char, _text: &str) -> bool {
        Self::accepts(ch)
    }
}

/// Digits and `.`, with a `-` allowed only in first position.
///
/// Validation requires at least one digit and at most one `.`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Numeric;

impl Predicate for Numeric {
    fn accept(&self, ch: char, text: &str) -> bool {
        ch.is_ascii_digit() || ch == '.' || (ch == '-' && text.is_empty())
    }

    fn validate(&self, text: &str) -> bool {
        text.bytes().any(|b| b.is_ascii_digit()) && text.bytes().filter(|&b| b == b'.').count() <= 1
    }
}

/// A delimited run such as a quoted string or a comment.
///
/// The candidate must open with `begin` and grows until it ends with an
/// `end` that is not escaped. An `end` is escaped when the text between
/// `begin` and it ends with an odd number of consecutive `escape`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    begin: String,
    end: String,
    escape: Option<String>,
}

impl Block {
    /// # Errors
    ///
    /// [`GrammarError::EmptyDelimiter`] if any delimiter is empty.
    pub fn new(begin: &str, end: &str, escape: Option<&str>) -> Result<Self, GrammarError> {
        if begin.is_empty() || end.is_empty() || escape.is_some_and(str::is_empty) {
            return Err(GrammarError::EmptyDelimiter);
        }
        Ok(Self {
            begin: begin.into(),
            end: end.into(),
            escape: escape.map(String::from),
        })
    }

    #[must_use]
    pub fn begin(&self) -> &str {
        &self.begin
    }

    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    #[must_use]
    pub fn escape(&self) -> Option<&str> {
        self.escape.as_deref()
    }

    fn is_closed(&self, text: &str) -> bool {
        if text.len() < self.begin.len() + self.end.len()
            || !text.starts_with(self.begin.as_str())
            || !text.ends_with(self.end.as_str())
        {
            return false;
        }
        let body = &text[self.begin.len()..text.len() - self.end.len()];
        !self.is_escaped(body)
    }

    fn is_escaped(&self, body: &str) -> bool {
        let Some(escape) = self.escape.as_deref() else {
            return false;
        };
        let mut run = 0usize;
        let mut rest = body;
        while let Some(stripped) = rest.strip_suffix(escape) {
            run += 1;
            rest = stripped;
        }
        run % 2 == 1
    }
}

impl Predicate for Block {
    fn accept(&self, ch: char, text: &str) -> bool {
        if text.len() < self.begin.len() {
            return self
                .begin
                .strip_prefix(text)
                .is_some_and(|rest| rest.starts_with(ch));
        }
        !self.is_closed(text)
    }

    fn validate(&self, text: &str) -> bool {
        self.is_closed(text)
    }
}

/// The rule a symbol matches with.
#[derive(Clone)]
pub enum Matcher {
    /// Exactly one codepoint.
    Char(char),
    /// Greedy extension guarded by a [`Predicate`].
    Predicate(Arc<dyn Predicate>),
    /// Delimited run, see [`Block`].
    Block(Block),
}

impl Matcher {
    #[must_use]
    pub fn char(ch: char) -> Self {
        Self::Char(ch)
    }

    /// A predicate matcher from a continuation and a validation closure.
    pub fn predicate<A, V>(accept: A, validate: V) -> Self
    where
        A: Fn(char, &str) -> bool + Send + Sync + 'static,
        V: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(FnPredicate { accept, validate }))
    }

    #[must_use]
    pub fn literal() -> Self {
        Self::Predicate(Arc::new(Literal))
    }

    /// A [`Literal`] run that must also satisfy `validate`.
    pub fn literal_with<V>(validate: V) -> Self
    where
        V: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::predicate(|ch, _| Literal::accepts(ch), validate)
    }

    #[must_use]
    pub fn numeric() -> Self {
        Self::Predicate(Arc::new(Numeric))
    }

    /// # Errors
    ///
    /// [`GrammarError::EmptyDelimiter`] if any delimiter is empty.
    pub fn block(begin: &str, end: &str, escape: Option<&str>) -> Result<Self, GrammarError> {
        Block::new(begin, end, escape).map(Self::Block)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => f.debug_tuple("Char").field(ch).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Block(b) => f.debug_tuple("Block").field(b).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rstest::rstest;

    use super::*;

    /// Feeds `input` through `predicate` the way the tokenizer does and
    /// returns the accepted prefix if it validates.
    fn run(predicate: &dyn Predicate, input: &str) -> Option<String> {
        let mut text = String::new();
        for ch in input.chars() {
            if !predicate.accept(ch, &text) {
                break;
            }
            text.push(ch);
        }
        (!text.is_empty() && predicate.validate(&text)).then_some(text)
    }

    #[rstest]
    #[case("foo_bar1 baz", Some("foo_bar1"))]
    #[case("naïve!", Some("naïve"))]
    #[case("_", Some("_"))]
    #[case("-x", None)]
    fn literal_runs(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(run(&Literal, input).as_deref(), expected);
    }

    #[rstest]
    #[case("21", Some("21"))]
    #[case("-3.5,", Some("-3.5"))]
    #[case("4-2", Some("4"))]
    #[case("-", None)]
    #[case("1.2.3", None)]
    #[case(".", None)]
    fn numeric_runs(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(run(&Numeric, input).as_deref(), expected);
    }

    #[rstest]
    #[case::plain("\"ab\" tail", None, Some("\"ab\""))]
    #[case::escaped_end(r#""a\"b" tail"#, Some("\\"), Some(r#""a\"b""#))]
    #[case::escaped_escape(r#""a\\" tail"#, Some("\\"), Some(r#""a\\""#))]
    #[case::three_escapes(r#""a\\\"b" x"#, Some("\\"), Some(r#""a\\\"b""#))]
    #[case::unterminated("\"abc", None, None)]
    #[case::not_a_block("abc\"", None, None)]
    #[case::empty_body("\"\"", None, Some("\"\""))]
    fn quoted_blocks(#[case] input: &str, #[case] escape: Option<&str>, #[case] expected: Option<&str>) {
        let block = Block::new("\"", "\"", escape).unwrap();
        assert_eq!(run(&block, input).as_deref(), expected);
    }

    #[rstest]
    #[case("/* a */ b", Some("/* a */"))]
    #[case("/**/", Some("/**/"))]
    #[case("/*/", None)]
    #[case("/ *", None)]
    fn multi_char_delimiters(#[case] input: &str, #[case] expected: Option<&str>) {
        let block = Block::new("/*", "*/", None).unwrap();
        assert_eq!(run(&block, input).as_deref(), expected);
    }

    #[test]
    fn escape_run_stays_inside_the_body() {
        // The escape equals the begin delimiter; it must not be counted.
        let block = Block::new("\\", "\\", Some("\\")).unwrap();
        assert_eq!(run(&block, "\\a\\").as_deref(), Some("\\a\\"));
    }

    #[test]
    fn empty_delimiters_are_rejected() {
        assert_eq!(Block::new("", "\"", None), Err(GrammarError::EmptyDelimiter));
        assert_eq!(Block::new("\"", "", None), Err(GrammarError::EmptyDelimiter));
        assert_eq!(Block::new("\"", "\"", Some("")), Err(GrammarError::EmptyDelimiter));
    }

    #[test]
    fn closures_drive_predicate_matchers() {
        let upper = Matcher::predicate(|ch, _| ch.is_ascii_uppercase(), |t| t.len() >= 2);
        let Matcher::Predicate(p) = upper else {
            panic!("expected a predicate matcher");
        };
        assert_eq!(run(&*p, "ABc").as_deref(), Some("AB"));
        assert_eq!(run(&*p, "Ab").as_deref(), None);
    }
}
