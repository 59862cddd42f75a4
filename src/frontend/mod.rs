use thiserror::Error;
use tracing::debug;

mod lexer;
mod parser;
#[cfg(test)]
mod tests;

pub use self::lexer::{tokenize, tokenizer, Token};
pub use self::parser::{expr, program, MAX_NESTING};
use crate::parsec::ParseResult;
use crate::syntax::ApoExp;

/// A program that does not follow the grammar. Positions are 1-based and
/// point at the token the parser was looking at when it gave up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    /// Character offset into the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    fn new(source: &str, message: String, offset: usize) -> Self {
        let (line, column) = source
            .chars()
            .take(offset)
            .fold((1, 1), |(line, column), c| {
                if c == '\n' {
                    (line + 1, 1)
                } else {
                    (line, column + 1)
                }
            });
        SyntaxError {
            message,
            offset,
            line,
            column,
        }
    }
}

pub fn parse(source: &str) -> Result<ApoExp, SyntaxError> {
    let tokens = tokenize(source);
    debug!(tokens = tokens.remaining().len(), "parsing program");
    match program().run(tokens) {
        ParseResult::Ok { value, .. } => Ok(value),
        ParseResult::Err { remainder, message } => {
            let offset = remainder
                .peek()
                .map_or_else(|| source.chars().count(), |t| t.offset);
            debug!(offset, %message, "parse failed");
            Err(SyntaxError::new(source, message, offset))
        }
    }
}
