use tracing::debug;

use super::{EvaluationError, InputProvider, Semantics};

/// Ordinary integer arithmetic, with inputs taken from an [`InputProvider`].
/// Leaving the `i64` range is an error rather than a wrap-around.
pub struct Concrete<I> {
    input: I,
}

impl<I: InputProvider> Concrete<I> {
    pub fn new(input: I) -> Self {
        Concrete { input }
    }
}

fn overflow(operation: &'static str) -> EvaluationError {
    EvaluationError::Overflow { operation }
}

impl<I: InputProvider> Semantics for Concrete<I> {
    type Value = i64;

    fn literal(&mut self, i: i64) -> Result<i64, EvaluationError> {
        Ok(i)
    }

    fn add(&mut self, left: i64, right: i64) -> Result<i64, EvaluationError> {
        left.checked_add(right).ok_or_else(|| overflow("addition"))
    }

    fn multiply(&mut self, left: i64, right: i64) -> Result<i64, EvaluationError> {
        left.checked_mul(right).ok_or_else(|| overflow("multiplication"))
    }

    fn negate(&mut self, value: i64) -> Result<i64, EvaluationError> {
        value.checked_neg().ok_or_else(|| overflow("negation"))
    }

    fn request_input(&mut self, from: i64, to: i64) -> Result<i64, EvaluationError> {
        let value = self.input.request_bounded_integer(from, to)?;
        debug!(from, to, value, "input requested");
        if (from..=to).contains(&value) {
            Ok(value)
        } else {
            Err(EvaluationError::InputOutOfRange { value, from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{evaluate_closed, CountingInput};
    use crate::syntax::ApoExp;

    struct Fixed(i64);

    impl InputProvider for Fixed {
        fn request_bounded_integer(&mut self, _: i64, _: i64) -> Result<i64, EvaluationError> {
            Ok(self.0)
        }
    }

    #[test]
    fn arithmetic() {
        let exp = ApoExp::plus(
            ApoExp::mult(ApoExp::IntLit(37), ApoExp::unary_min(ApoExp::IntLit(3))),
            ApoExp::IntLit(2),
        );
        assert_eq!(
            evaluate_closed(&mut Concrete::new(CountingInput::new()), &exp),
            Ok(-109)
        );
    }

    #[test]
    fn inputs_come_from_the_provider_in_order() {
        let exp = ApoExp::plus(
            ApoExp::unbounded_input(),
            ApoExp::mult(ApoExp::IntLit(10), ApoExp::unbounded_input()),
        );
        let mut concrete = Concrete::new(CountingInput::new());
        assert_eq!(evaluate_closed(&mut concrete, &exp), Ok(10));
        assert_eq!(evaluate_closed(&mut concrete, &exp), Ok(2 + 30));
    }

    #[test]
    fn overflow_is_reported() {
        let exp = ApoExp::mult(ApoExp::IntLit(i64::MAX), ApoExp::IntLit(2));
        assert_eq!(
            evaluate_closed(&mut Concrete::new(CountingInput::new()), &exp),
            Err(EvaluationError::Overflow {
                operation: "multiplication"
            })
        );
        let exp = ApoExp::unary_min(ApoExp::IntLit(i64::MIN));
        assert_eq!(
            evaluate_closed(&mut Concrete::new(CountingInput::new()), &exp),
            Err(EvaluationError::Overflow {
                operation: "negation"
            })
        );
    }

    #[test]
    fn provider_answers_are_checked() {
        let exp = ApoExp::input(0, 10);
        assert_eq!(
            evaluate_closed(&mut Concrete::new(Fixed(11)), &exp),
            Err(EvaluationError::InputOutOfRange {
                value: 11,
                from: 0,
                to: 10
            })
        );
        assert_eq!(evaluate_closed(&mut Concrete::new(Fixed(10)), &exp), Ok(10));
    }
}
