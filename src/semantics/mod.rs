//! Meanings of ApoML expressions.
//!
//! A [`Semantics`] gives a meaning to each operator of the language. The
//! meaning of a whole expression then follows by induction on its structure,
//! which [`evaluate`] does once for every instantiation.

use thiserror::Error;

mod concrete;
mod initial;
mod input;
mod interval;

pub use self::concrete::Concrete;
pub use self::initial::Initial;
pub use self::input::{CountingInput, InputProvider, PromptInput};
pub use self::interval::{Interval, IntervalAnalysis};
use crate::syntax::ApoExp;
use crate::utils::Frame;

/// Values of the variables in scope, for some semantics' value type.
pub type Env<V> = Frame<String, V>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("unbound variable '{0}'")]
    UnboundVariable(String),
    #[error("integer overflow in {operation}")]
    Overflow { operation: &'static str },
    #[error("input {value} is outside the requested range [{from}, {to}]")]
    InputOutOfRange { value: i64, from: i64, to: i64 },
    #[error("no input available: {0}")]
    Input(String),
    #[error("input range [{from}, {to}] is empty")]
    EmptyRange { from: i64, to: i64 },
}

pub trait Semantics {
    type Value: Clone;

    fn literal(&mut self, i: i64) -> Result<Self::Value, EvaluationError>;
    fn add(&mut self, left: Self::Value, right: Self::Value)
        -> Result<Self::Value, EvaluationError>;
    fn multiply(
        &mut self,
        left: Self::Value,
        right: Self::Value,
    ) -> Result<Self::Value, EvaluationError>;
    fn negate(&mut self, value: Self::Value) -> Result<Self::Value, EvaluationError>;
    /// A value somewhere in `from..=to`.
    fn request_input(&mut self, from: i64, to: i64) -> Result<Self::Value, EvaluationError>;
}

/// The meaning of `exp` under `semantics`, with `env` giving the meaning of
/// its free variables. Operands are evaluated left to right.
pub fn evaluate<S: Semantics + ?Sized>(
    semantics: &mut S,
    exp: &ApoExp,
    env: &Env<S::Value>,
) -> Result<S::Value, EvaluationError> {
    match exp {
        ApoExp::IntLit(i) => semantics.literal(*i),
        ApoExp::UnaryMin(exp) => {
            let value = evaluate(semantics, exp, env)?;
            semantics.negate(value)
        }
        ApoExp::Mult(..) | ApoExp::Plus(..) => evaluate_chain(semantics, exp, env),
        ApoExp::Input { from, to } if from > to => Err(EvaluationError::EmptyRange {
            from: *from,
            to: *to,
        }),
        ApoExp::Input { from, to } => semantics.request_input(*from, *to),
        ApoExp::LetIn { name, fst, snd } => {
            let bound = evaluate(semantics, fst, env)?;
            evaluate(semantics, snd, &env.bind(name.clone(), bound))
        }
        ApoExp::Var(name) => env
            .lookup(name.as_str())
            .cloned()
            .ok_or_else(|| EvaluationError::UnboundVariable(name.clone())),
    }
}

#[derive(Copy, Clone)]
enum Operator {
    Add,
    Multiply,
}

/// Evaluates a run of sums and products nested on the left, like the ones
/// `1 + 2 + ... + n` parses to, in a loop. Only right operands recurse.
fn evaluate_chain<S: Semantics + ?Sized>(
    semantics: &mut S,
    exp: &ApoExp,
    env: &Env<S::Value>,
) -> Result<S::Value, EvaluationError> {
    let mut spine = vec![];
    let mut leftmost = exp;
    loop {
        let (operator, left, right) = match leftmost {
            ApoExp::Plus(left, right) => (Operator::Add, left.as_ref(), right.as_ref()),
            ApoExp::Mult(left, right) => (Operator::Multiply, left.as_ref(), right.as_ref()),
            _ => break,
        };
        spine.push((operator, right));
        leftmost = left;
    }

    let mut value = evaluate(semantics, leftmost, env)?;
    for (operator, right) in spine.into_iter().rev() {
        let right = evaluate(semantics, right, env)?;
        value = match operator {
            Operator::Add => semantics.add(value, right)?,
            Operator::Multiply => semantics.multiply(value, right)?,
        };
    }
    Ok(value)
}

/// [`evaluate`] a closed expression.
pub fn evaluate_closed<S: Semantics + ?Sized>(
    semantics: &mut S,
    exp: &ApoExp,
) -> Result<S::Value, EvaluationError> {
    evaluate(semantics, exp, &Env::new())
}
