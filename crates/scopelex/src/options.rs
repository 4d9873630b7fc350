/// Bytes requested from a document when the decoder has none buffered.
pub(crate) const DEFAULT_READ_AHEAD: usize = 64;

/// Configuration options for a [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use scopelex::TokenizerOptions;
///
/// let options = TokenizerOptions {
///     error_limit: Some(10),
///     ..Default::default()
/// };
/// assert_eq!(options.read_ahead, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    /// How many bytes to request from the document when the decoder has
    /// none buffered.
    ///
    /// Continuation bytes of a split sequence are always requested exactly,
    /// whatever this value is. Zero behaves like one.
    ///
    /// # Default
    ///
    /// `64`
    pub read_ahead: usize,

    /// Stop as soon as this many lexical errors have been recorded.
    ///
    /// A run stopped this way returns a result whose
    /// [`is_success`](crate::ParseResult::is_success) is `false`, holding
    /// the tokens and errors gathered so far.
    ///
    /// # Default
    ///
    /// `None` (scan to the end of input)
    pub error_limit: Option<usize>,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            read_ahead: DEFAULT_READ_AHEAD,
            error_limit: None,
        }
    }
}
