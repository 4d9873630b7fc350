#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scopelex::{ChunkedDocument, Grammar, Matcher, SliceDocument, Symbol, Tokenizer, TokenizerOptions};
use tokio::runtime::Runtime;

thread_local! {
    static RUNTIME: Runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
}

#[derive(Debug, Arbitrary)]
struct Input {
    chunk: u8,
    read_ahead: u8,
    error_limit: Option<u8>,
    bytes: Vec<u8>,
}

fn grammar() -> Grammar {
    let mut b = Grammar::builder();
    b.scope("text", true)
        .unwrap()
        .ignore("text", Symbol::new("space", Matcher::char(' ')))
        .unwrap()
        .symbol("text", Symbol::new("open", Matcher::char('<')).then_scope("tag"))
        .unwrap()
        .symbol("text", Symbol::new("number", Matcher::numeric()))
        .unwrap()
        .symbol("text", Symbol::new("comment", Matcher::block("/*", "*/", None).unwrap()))
        .unwrap()
        .symbol("text", Symbol::new("word", Matcher::literal()))
        .unwrap();
    b.scope("tag", false)
        .unwrap()
        .symbol("tag", Symbol::new("close", Matcher::char('>')).then_scope("text"))
        .unwrap()
        .symbol("tag", Symbol::new("string", Matcher::block("\"", "\"", Some("\\")).unwrap()))
        .unwrap()
        .symbol("tag", Symbol::new("name", Matcher::literal()))
        .unwrap()
        .symbol("tag", Symbol::new("tab", Matcher::char('\t')).flag_invalid("tab"))
        .unwrap();
    b.build()
}

fuzz_target!(|input: Input| {
    let options = TokenizerOptions {
        read_ahead: usize::from(input.read_ahead),
        error_limit: input.error_limit.map(usize::from),
    };
    let tokenizer = Tokenizer::with_options(grammar(), options);

    RUNTIME.with(|rt| {
        let mut chunked = ChunkedDocument::new(&input.bytes, usize::from(input.chunk));
        let chunked = rt.block_on(tokenizer.parse(&mut chunked));
        let whole = rt.block_on(tokenizer.parse(&mut SliceDocument::new(&input.bytes)));

        match (chunked, whole) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b, "chunking changed the result");
                let mut position = 0;
                for token in a.tokens() {
                    assert!(token.position() >= position, "tokens out of order");
                    assert!(token.length() > 0, "empty token");
                    position = token.position() + token.length();
                }
            }
            (Err(a), Err(b)) => assert_eq!(a, b, "chunking changed the error"),
            (a, b) => panic!("chunked {a:?} but whole {b:?}"),
        }
    });
});
