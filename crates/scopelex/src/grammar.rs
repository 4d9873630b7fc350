//! Scopes, symbols, and the builder that freezes them into a [`Grammar`].

use alloc::{collections::BTreeMap, string::ToString, sync::Arc, vec::Vec};

use crate::{error::GrammarError, matcher::Matcher};

/// A grammar rule: a matcher plus what happens when it matches.
#[derive(Debug, Clone)]
pub struct Symbol {
    kind: Arc<str>,
    matcher: Matcher,
    next_scope: Option<Arc<str>>,
    invalid: Option<Arc<str>>,
}

impl Symbol {
    pub fn new(kind: impl Into<Arc<str>>, matcher: Matcher) -> Self {
        Self {
            kind: kind.into(),
            matcher,
            next_scope: None,
            invalid: None,
        }
    }

    /// Switch to `scope` after this symbol matches.
    #[must_use]
    pub fn then_scope(mut self, scope: impl Into<Arc<str>>) -> Self {
        self.next_scope = Some(scope.into());
        self
    }

    /// Report lexemes of this symbol as invalid tokens carrying `message`.
    #[must_use]
    pub fn flag_invalid(mut self, message: impl Into<Arc<str>>) -> Self {
        self.invalid = Some(message.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub(crate) fn kind_arc(&self) -> Arc<str> {
        Arc::clone(&self.kind)
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[must_use]
    pub fn next_scope(&self) -> Option<&str> {
        self.next_scope.as_deref()
    }

    #[must_use]
    pub fn invalid_message(&self) -> Option<&str> {
        self.invalid.as_deref()
    }
}

/// A named grammar context: symbols that produce nothing, then symbols that
/// produce tokens, each tried in registration order.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    ignore: Vec<Symbol>,
    symbols: Vec<Symbol>,
}

impl Scope {
    #[must_use]
    pub fn ignore_symbols(&self) -> &[Symbol] {
        &self.ignore
    }

    #[must_use]
    pub fn match_symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// An immutable set of scopes with one default.
///
/// Safe to share between concurrent tokenizer runs.
#[derive(Debug, Clone)]
pub struct Grammar {
    scopes: BTreeMap<Arc<str>, Scope>,
    default_scope: Arc<str>,
}

impl Grammar {
    #[must_use]
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    #[must_use]
    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.get(name)
    }

    pub(crate) fn scope_entry(&self, name: &str) -> Option<(&str, &Scope)> {
        self.scopes.get_key_value(name).map(|(k, v)| (&**k, v))
    }

    /// Name of the scope a run starts in.
    #[must_use]
    pub fn default_scope(&self) -> &str {
        &self.default_scope
    }

    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(|k| &**k)
    }
}

/// Collects scopes and symbols. Every registration mistake is reported by
/// the call that makes it.
///
/// ```rust
/// use scopelex::{Grammar, Matcher, Symbol};
///
/// let mut builder = Grammar::builder();
/// builder
///     .scope("main", true)?
///     .ignore("main", Symbol::new("space", Matcher::char(' ')))?
///     .symbol("main", Symbol::new("number", Matcher::numeric()))?;
/// let grammar = builder.build();
/// assert_eq!(grammar.default_scope(), "main");
/// # Ok::<(), scopelex::GrammarError>(())
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    scopes: BTreeMap<Arc<str>, Scope>,
    default_scope: Option<Arc<str>>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an empty scope.
    ///
    /// # Errors
    ///
    /// If `name` is already declared, or `is_default` is set while another
    /// scope is the default.
    pub fn scope(&mut self, name: &str, is_default: bool) -> Result<&mut Self, GrammarError> {
        if self.scopes.contains_key(name) {
            return Err(GrammarError::DuplicateScope(name.to_string()));
        }
        let name: Arc<str> = Arc::from(name);
        if is_default {
            if let Some(first) = &self.default_scope {
                return Err(GrammarError::DuplicateDefault {
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
            self.default_scope = Some(Arc::clone(&name));
        }
        self.scopes.insert(name, Scope::default());
        Ok(self)
    }

    /// Appends a symbol whose matches are dropped without a token.
    ///
    /// # Errors
    ///
    /// If `scope` is undeclared or the symbol kind is empty.
    pub fn ignore(&mut self, scope: &str, symbol: Symbol) -> Result<&mut Self, GrammarError> {
        self.scope_mut(scope, &symbol)?.ignore.push(symbol);
        Ok(self)
    }

    /// Appends a symbol whose matches become tokens.
    ///
    /// # Errors
    ///
    /// If `scope` is undeclared or the symbol kind is empty.
    pub fn symbol(&mut self, scope: &str, symbol: Symbol) -> Result<&mut Self, GrammarError> {
        self.scope_mut(scope, &symbol)?.symbols.push(symbol);
        Ok(self)
    }

    fn scope_mut(&mut self, scope: &str, symbol: &Symbol) -> Result<&mut Scope, GrammarError> {
        if symbol.kind.is_empty() {
            return Err(GrammarError::EmptyKind);
        }
        self.scopes
            .get_mut(scope)
            .ok_or_else(|| GrammarError::UnknownScope(scope.to_string()))
    }

    /// Freezes the grammar.
    ///
    /// Without a declared default, runs start in the `""` scope, which is
    /// added empty when it was not declared.
    #[must_use]
    pub fn build(self) -> Grammar {
        let mut scopes = self.scopes;
        let default_scope = self.default_scope.unwrap_or_else(|| Arc::from(""));
        scopes.entry(Arc::clone(&default_scope)).or_default();
        Grammar {
            scopes,
            default_scope,
        }
    }
}
