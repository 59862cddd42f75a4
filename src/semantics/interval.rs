use std::fmt::{self, Display, Formatter};

use super::{EvaluationError, Semantics};

/// All integers from `lower` to `upper`, inclusive. Never empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    lower: i64,
    upper: i64,
}

impl Interval {
    /// `lower` must not be greater than `upper`.
    pub fn new(lower: i64, upper: i64) -> Self {
        debug_assert!(lower <= upper, "empty interval [{lower}, {upper}]");
        Interval { lower, upper }
    }

    pub const fn singleton(value: i64) -> Self {
        Interval {
            lower: value,
            upper: value,
        }
    }

    pub const fn lower(&self) -> i64 {
        self.lower
    }

    pub const fn upper(&self) -> i64 {
        self.upper
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Over-approximates the value of an expression by the interval of all
/// values it may take, without asking for any input.
///
/// Bounds saturate at the edges of `i64`, so the result covers every
/// concrete evaluation that does not overflow.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntervalAnalysis;

impl Semantics for IntervalAnalysis {
    type Value = Interval;

    fn literal(&mut self, i: i64) -> Result<Interval, EvaluationError> {
        Ok(Interval::singleton(i))
    }

    fn add(&mut self, left: Interval, right: Interval) -> Result<Interval, EvaluationError> {
        Ok(Interval::new(
            left.lower.saturating_add(right.lower),
            left.upper.saturating_add(right.upper),
        ))
    }

    fn multiply(&mut self, left: Interval, right: Interval) -> Result<Interval, EvaluationError> {
        // a sign flip can make any corner the extreme one
        let corners = [
            left.lower.saturating_mul(right.lower),
            left.lower.saturating_mul(right.upper),
            left.upper.saturating_mul(right.lower),
            left.upper.saturating_mul(right.upper),
        ];
        Ok(Interval::new(
            corners.into_iter().fold(i64::MAX, i64::min),
            corners.into_iter().fold(i64::MIN, i64::max),
        ))
    }

    fn negate(&mut self, value: Interval) -> Result<Interval, EvaluationError> {
        Ok(Interval::new(
            value.upper.saturating_neg(),
            value.lower.saturating_neg(),
        ))
    }

    fn request_input(&mut self, from: i64, to: i64) -> Result<Interval, EvaluationError> {
        Ok(Interval::new(from, to))
    }
}
