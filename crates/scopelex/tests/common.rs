#![allow(missing_docs, dead_code)]

use core::fmt::Write;

use scopelex::{Grammar, Matcher, ParseResult, Symbol};

/// `{name: value}` style records: braces, keys, numbers, quoted strings.
pub fn brace_grammar() -> Grammar {
    let mut b = Grammar::builder();
    b.scope("main", true)
        .unwrap()
        .ignore("main", Symbol::new("space", Matcher::predicate(|ch, _| matches!(ch, ' ' | '\n' | '\r'), |_| true)))
        .unwrap()
        .ignore("main", Symbol::new("comment", Matcher::block("/*", "*/", None).unwrap()))
        .unwrap()
        .symbol("main", Symbol::new("open", Matcher::char('{')))
        .unwrap()
        .symbol("main", Symbol::new("close", Matcher::char('}')))
        .unwrap()
        .symbol("main", Symbol::new("colon", Matcher::char(':')))
        .unwrap()
        .symbol("main", Symbol::new("comma", Matcher::char(',')))
        .unwrap()
        .symbol("main", Symbol::new("number", Matcher::numeric()))
        .unwrap()
        .symbol(
            "main",
            Symbol::new("string", Matcher::block("\"", "\"", Some("\\")).unwrap()),
        )
        .unwrap()
        .symbol("main", Symbol::new("keyword", Matcher::literal_with(|t| t == "true" || t == "false")))
        .unwrap()
        .symbol("main", Symbol::new("name", Matcher::literal()))
        .unwrap()
        .symbol("main", Symbol::new("tab", Matcher::char('\t')).flag_invalid("tabs are not allowed"))
        .unwrap();
    b.build()
}

/// Text with `<tag attr="v">` elements; tags are their own scope.
pub fn markup_grammar() -> Grammar {
    let mut b = Grammar::builder();
    b.scope("content", true)
        .unwrap()
        .symbol("content", Symbol::new("lt", Matcher::char('<')).then_scope("tag"))
        .unwrap()
        .symbol("content", Symbol::new("text", Matcher::predicate(|ch, _| ch != '<', |_| true)))
        .unwrap();
    b.scope("tag", false)
        .unwrap()
        .ignore("tag", Symbol::new("space", Matcher::char(' ')))
        .unwrap()
        .symbol("tag", Symbol::new("gt", Matcher::char('>')).then_scope("content"))
        .unwrap()
        .symbol("tag", Symbol::new("slash", Matcher::char('/')))
        .unwrap()
        .symbol("tag", Symbol::new("eq", Matcher::char('=')))
        .unwrap()
        .symbol("tag", Symbol::new("value", Matcher::block("\"", "\"", None).unwrap()))
        .unwrap()
        .symbol("tag", Symbol::new("ident", Matcher::literal()))
        .unwrap();
    b.build()
}

/// One `Display` line per token, then one `error:` line per message.
pub fn render(result: &ParseResult) -> String {
    let mut out = String::new();
    for token in result.tokens() {
        writeln!(out, "{token}").unwrap();
    }
    for error in result.errors() {
        writeln!(out, "error: {error}").unwrap();
    }
    if !result.is_success() {
        writeln!(out, "stopped early").unwrap();
    }
    out
}
