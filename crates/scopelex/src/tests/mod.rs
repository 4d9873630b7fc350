use core::future::Future;


/// Drives a future to completion on a fresh current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime")
        .block_on(future)
}

/// Two-scope grammar without ignore symbols, so every input codepoint ends
/// up in exactly one token.
pub(crate) fn markup_grammar() -> crate::Grammar {
    use crate::{Grammar, Matcher, Symbol};

    let mut b = Grammar::builder();
    b.scope("text", true)
        .unwrap()
        .symbol("text", Symbol::new("open", Matcher::char('<')).then_scope("tag"))
        .unwrap()
        .symbol("text", Symbol::new("number", Matcher::numeric()))
        .unwrap()
        .symbol("text", Symbol::new("word", Matcher::literal()))
        .unwrap()
        .symbol("text", Symbol::new("space", Matcher::char(' ')))
        .unwrap();
    b.scope("tag", false)
        .unwrap()
        .symbol("tag", Symbol::new("close", Matcher::char('>')).then_scope("text"))
        .unwrap()
        .symbol(
            "tag",
            Symbol::new("string", Matcher::block("\"", "\"", Some("\\")).unwrap()),
        )
        .unwrap()
        .symbol("tag", Symbol::new("name", Matcher::literal()))
        .unwrap()
        .symbol("tag", Symbol::new("eq", Matcher::char('=')))
        .unwrap()
        .symbol("tag", Symbol::new("tab", Matcher::char('\t')).flag_invalid("tab inside tag"))
        .unwrap();
    b.build()
}

pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
