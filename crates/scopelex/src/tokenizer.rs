//! The driver loop.
//!
//! Each iteration makes sure the lookahead holds at least one codepoint,
//! then does exactly one of three things in the active scope: consume an
//! ignore-symbol match, consume a symbol match and emit its token, or
//! consume one codepoint as an invalid token. Every iteration advances the
//! position, so a finite document always ends the loop.
//!
//! Predicate matchers may read past the first codepoint before they know
//! whether they match. Whatever they decode lands in the lookahead and
//! stays there for the next candidate; only an accepted match drains it.

use alloc::{
    collections::VecDeque,
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::convert::Infallible;

use crate::{
    decoder::{ReadResult, Utf8Decoder},
    document::{Document, SliceDocument},
    error::TokenizeError,
    grammar::{Grammar, Scope, Symbol},
    matcher::{Matcher, Predicate},
    options::TokenizerOptions,
    token::{InvalidToken, ParseResult, SymbolToken, Token},
};

/// Runs a [`Grammar`] over documents.
///
/// Cloning is cheap and clones share the grammar; any number of runs may
/// use it at once.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    grammar: Arc<Grammar>,
    options: TokenizerOptions,
}

impl Tokenizer {
    pub fn new(grammar: impl Into<Arc<Grammar>>) -> Self {
        Self::with_options(grammar, TokenizerOptions::default())
    }

    pub fn with_options(grammar: impl Into<Arc<Grammar>>, options: TokenizerOptions) -> Self {
        Self {
            grammar: grammar.into(),
            options,
        }
    }

    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[must_use]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Tokenizes `document` to its end.
    ///
    /// Unmatched input is reported through invalid tokens and the error list
    /// of the result, never as `Err`.
    ///
    /// # Errors
    ///
    /// Fatal conditions abort the run: a failed document read, malformed
    /// UTF-8, or a transition into an undeclared scope.
    #[tracing::instrument(level = "debug", skip_all, fields(scope = self.grammar.default_scope()))]
    pub async fn parse<D: Document>(
        &self,
        document: &mut D,
    ) -> Result<ParseResult, TokenizeError<D::Error>> {
        let result = self.run(document).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "tokenizer run aborted");
        }
        result
    }

    /// Tokenizes an in-memory string.
    ///
    /// # Errors
    ///
    /// Only [`TokenizeError::UndeclaredScope`] can occur.
    pub async fn parse_str(&self, text: &str) -> Result<ParseResult, TokenizeError<Infallible>> {
        self.parse(&mut SliceDocument::from(text)).await
    }

    async fn run<D: Document>(
        &self,
        document: &mut D,
    ) -> Result<ParseResult, TokenizeError<D::Error>> {
        let mut status = ReadStatus::new::<D::Error>(&self.grammar, self.options.read_ahead)?;
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while status.fill(document).await? {
            let Some(token) = status.step(document).await? else {
                continue;
            };
            tracing::trace!(%token, "emit");
            let invalid = match &token {
                Token::Invalid(t) => Some(t.message().to_string()),
                Token::Symbol(_) => None,
            };
            tokens.push(token);

            if let Some(message) = invalid {
                errors.push(message);
                if self.options.error_limit.is_some_and(|limit| errors.len() >= limit) {
                    tracing::debug!(
                        errors = errors.len(),
                        position = status.position,
                        "error limit reached"
                    );
                    return Ok(ParseResult::fail(tokens, errors));
                }
            }
        }

        tracing::debug!(tokens = tokens.len(), errors = errors.len(), "end of input");
        Ok(ParseResult::success(tokens, errors))
    }
}

/// Per-run cursor: lookahead, active scope, committed position.
struct ReadStatus<'g> {
    grammar: &'g Grammar,
    scope_name: &'g str,
    scope: &'g Scope,
    lookahead: VecDeque<char>,
    position: u64,
    decoder: Utf8Decoder,
    end_of_input: bool,
}

impl<'g> ReadStatus<'g> {
    fn new<E>(grammar: &'g Grammar, read_ahead: usize) -> Result<Self, TokenizeError<E>> {
        let name = grammar.default_scope();
        let Some((scope_name, scope)) = grammar.scope_entry(name) else {
            return Err(TokenizeError::UndeclaredScope(name.to_string()));
        };
        Ok(Self {
            grammar,
            scope_name,
            scope,
            lookahead: VecDeque::new(),
            position: 0,
            decoder: Utf8Decoder::new(read_ahead),
            end_of_input: false,
        })
    }

    /// Decodes one more codepoint into the lookahead. `false` at end of input.
    async fn pull<D: Document>(&mut self, document: &mut D) -> Result<bool, TokenizeError<D::Error>> {
        if self.end_of_input {
            return Ok(false);
        }
        match self.decoder.decode(document).await? {
            ReadResult::EndOfInput => {
                self.end_of_input = true;
                Ok(false)
            }
            ReadResult::Codepoint { ch, .. } => {
                self.lookahead.push_back(ch);
                Ok(true)
            }
        }
    }

    async fn fill<D: Document>(&mut self, document: &mut D) -> Result<bool, TokenizeError<D::Error>> {
        if !self.lookahead.is_empty() {
            return Ok(true);
        }
        self.pull(document).await
    }

    /// One driver iteration. Requires a non-empty lookahead.
    async fn step<D: Document>(
        &mut self,
        document: &mut D,
    ) -> Result<Option<Token>, TokenizeError<D::Error>> {
        let scope = self.scope;

        for symbol in scope.ignore_symbols() {
            if let Some(len) = self.try_match(symbol.matcher(), document).await? {
                self.commit(len);
                self.transition::<D::Error>(symbol)?;
                return Ok(None);
            }
        }

        for symbol in scope.match_symbols() {
            if let Some(len) = self.try_match(symbol.matcher(), document).await? {
                let (position, text) = self.commit(len);
                self.transition::<D::Error>(symbol)?;
                let length = len as u64;
                let token: Token = match symbol.invalid_message() {
                    Some(message) => {
                        InvalidToken::new(position, length, text, message.to_string()).into()
                    }
                    None => SymbolToken::new(position, length, symbol.kind_arc(), text).into(),
                };
                return Ok(Some(token));
            }
        }

        let (position, text) = self.commit(1);
        let message = format!("Unexpected character '{text}' at position {position}");
        Ok(Some(InvalidToken::new(position, 1, text, message).into()))
    }

    /// Number of codepoints `matcher` would consume, without consuming them.
    async fn try_match<D: Document>(
        &mut self,
        matcher: &Matcher,
        document: &mut D,
    ) -> Result<Option<usize>, TokenizeError<D::Error>> {
        match matcher {
            Matcher::Char(target) => Ok((self.lookahead.front() == Some(target)).then_some(1)),
            Matcher::Predicate(predicate) => self.extend(&**predicate, document).await,
            Matcher::Block(block) => self.extend(block, document).await,
        }
    }

    async fn extend<D: Document>(
        &mut self,
        predicate: &dyn Predicate,
        document: &mut D,
    ) -> Result<Option<usize>, TokenizeError<D::Error>> {
        let mut text = String::new();
        let mut len = 0;
        loop {
            if len == self.lookahead.len() && !self.pull(document).await? {
                break;
            }
            let ch = self.lookahead[len];
            if !predicate.accept(ch, &text) {
                break;
            }
            text.push(ch);
            len += 1;
        }
        Ok((len > 0 && predicate.validate(&text)).then_some(len))
    }

    fn commit(&mut self, len: usize) -> (u64, String) {
        let position = self.position;
        let text: String = self.lookahead.drain(..len).collect();
        self.position += len as u64;
        (position, text)
    }

    fn transition<E>(&mut self, symbol: &Symbol) -> Result<(), TokenizeError<E>> {
        let Some(next) = symbol.next_scope() else {
            return Ok(());
        };
        let grammar = self.grammar;
        let Some((name, scope)) = grammar.scope_entry(next) else {
            return Err(TokenizeError::UndeclaredScope(next.to_string()));
        };
        tracing::debug!(
            from = self.scope_name,
            to = name,
            position = self.position,
            "scope switch"
        );
        self.scope_name = name;
        self.scope = scope;
        Ok(())
    }
}
