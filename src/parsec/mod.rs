//! A small backtracking parser-combinator library, generic over the element
//! type of the input.
//!
//! Parsers are assembled in layers: a handful of primitives act directly on
//! [`Stream`]s, and everything above them is built only from the primitives
//! and the combinators on [`Parser`].

pub mod chars;
mod parser;
mod result;
mod stream;

pub use self::parser::{
    any, choice, end_of_input, exactly, exactly_seq, fail, position, pure, rec, satisfy,
    take_exactly, Parser,
};
pub use self::result::ParseResult;
pub use self::stream::Stream;
