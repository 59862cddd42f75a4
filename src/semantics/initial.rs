use super::{EvaluationError, Semantics};
use crate::syntax::ApoExp;

/// Echoes the syntax back instead of doing any work.
///
/// Variables are replaced by the expression they are bound to, so evaluating
/// under this semantics inlines every `let`. An input bound to a variable that
/// is used twice becomes two inputs.
#[derive(Copy, Clone, Debug, Default)]
pub struct Initial;

impl Semantics for Initial {
    type Value = ApoExp;

    fn literal(&mut self, i: i64) -> Result<ApoExp, EvaluationError> {
        Ok(ApoExp::IntLit(i))
    }

    fn add(&mut self, left: ApoExp, right: ApoExp) -> Result<ApoExp, EvaluationError> {
        Ok(ApoExp::plus(left, right))
    }

    fn multiply(&mut self, left: ApoExp, right: ApoExp) -> Result<ApoExp, EvaluationError> {
        Ok(ApoExp::mult(left, right))
    }

    fn negate(&mut self, value: ApoExp) -> Result<ApoExp, EvaluationError> {
        Ok(ApoExp::unary_min(value))
    }

    fn request_input(&mut self, from: i64, to: i64) -> Result<ApoExp, EvaluationError> {
        Ok(ApoExp::input(from, to))
    }
}
