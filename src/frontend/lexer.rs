use std::fmt::{self, Display, Formatter};
use std::iter::once;

use tracing::trace;

use crate::parsec::chars::{digit, satisfy_char, string, whitespace};
use crate::parsec::{any, choice, position, ParseResult, Parser, Stream};

pub const KEYWORDS: [&str; 2] = ["let", "in"];

const PUNCTUATION: [&str; 10] = [",", "?", "(", ")", "[", "]", "*", "+", "-", "="];

#[derive(Clone, Debug)]
pub struct Token {
    pub text: String,
    /// Character offset of the first character of the token in the source.
    pub offset: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}

/// Surround `p` with optional whitespace and remember where it started.
fn token(p: Parser<char, String>) -> Parser<char, Token> {
    whitespace()
        .skip_and(position().and(p))
        .and_skip(whitespace())
        .map(|(offset, text)| Token { text, offset })
}

fn identifier() -> Parser<char, String> {
    satisfy_char(
        |c| c.is_alphabetic() || c == '_',
        |c| format!("invalid first character for an identifier '{c}'"),
    )
    .and(
        satisfy_char(
            |c| c.is_alphanumeric() || c == '_' || c == '\'',
            |c| format!("invalid character for an identifier '{c}'"),
        )
        .many(),
    )
    .map(|(head, tail)| once(head).chain(tail).collect())
}

/// A keyword is a whole word, so `letter` is an identifier and not `let`
/// followed by `ter`.
fn keyword(kw: &'static str) -> Parser<char, String> {
    identifier().filter(move |word| word == kw, move |word| {
        format!("expected keyword '{kw}', got '{word}'")
    })
}

fn int_literal() -> Parser<char, String> {
    digit().plus().map(|digits| digits.into_iter().collect())
}

/// A single token.
pub fn tokenizer() -> Parser<char, Token> {
    let keywords = KEYWORDS.into_iter().map(|kw| token(keyword(kw)));
    let punctuation = PUNCTUATION.into_iter().map(|p| token(string(p)));
    let rest = [
        token(int_literal()),
        token(identifier()),
        // anything else becomes a token of its own, for the grammar to reject
        token(any().map(String::from)),
    ];
    choice(keywords.chain(punctuation).chain(rest).collect())
}

/// Split `source` into tokens, dropping whitespace.
pub fn tokenize(source: &str) -> Stream<Token> {
    // many() never fails; leftover input can only be trailing whitespace
    let tokens = match tokenizer().many().run(Stream::from(source)) {
        ParseResult::Ok { value, .. } => value,
        ParseResult::Err { .. } => vec![],
    };
    trace!(
        tokens = ?tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        "tokenized source"
    );
    Stream::new(tokens)
}
