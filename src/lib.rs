//! ApoML: a calculator language with bounded nondeterministic inputs, built
//! on a generic parser-combinator library and interpreted through a single
//! algebraic interface.

pub mod frontend;
pub mod parsec;
mod pretty;
pub mod semantics;
pub mod syntax;
pub mod utils;
