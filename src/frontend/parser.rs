use super::lexer::{Token, KEYWORDS};
use crate::parsec::{choice, end_of_input, fail, pure, rec, satisfy, Parser, Stream};
use crate::syntax::ApoExp;

type P<T> = Parser<Token, T>;

fn describe(s: &Stream<Token>) -> String {
    match s.peek() {
        Some(t) => format!("'{t}'"),
        None => "end of input".to_owned(),
    }
}

fn keyword(kw: &'static str) -> P<Token> {
    satisfy(move |t: &Token| t.text == kw, |_| String::new())
        .label(move |s| format!("expected '{kw}', got {}", describe(s)))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '\'')
        && !KEYWORDS.contains(&text)
}

fn parse_i64(text: String) -> P<i64> {
    match text.parse() {
        Ok(i) => pure(i),
        Err(_) => fail(format!("integer literal {text} does not fit in 64 bits")),
    }
}

fn digits() -> P<Token> {
    satisfy(|t: &Token| is_digits(&t.text), |_| String::new())
        .label(|s| format!("expected integer, got {}", describe(s)))
}

fn natural() -> P<i64> {
    digits().flat_map(|t| parse_i64(t.text))
}

/// An integer with an optional leading `-`, parsed as a whole so that
/// `i64::MIN` is reachable.
fn signed() -> P<i64> {
    keyword("-")
        .optional()
        .and(digits())
        .flat_map(|(minus, t)| match minus {
            Some(_) => parse_i64(format!("-{}", t.text)),
            None => parse_i64(t.text),
        })
}

fn identifier() -> P<String> {
    satisfy(|t: &Token| is_identifier(&t.text), |_| String::new())
        .label(|s| format!("expected identifier, got {}", describe(s)))
        .map(|t| t.text)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Bound {
    Open,
    Closed,
}

fn lower_delimiter() -> P<Bound> {
    choice(vec![
        keyword("(").map(|_| Bound::Open),
        keyword("[").map(|_| Bound::Closed),
    ])
}

fn upper_delimiter() -> P<Bound> {
    choice(vec![
        keyword(")").map(|_| Bound::Open),
        keyword("]").map(|_| Bound::Closed),
    ])
}

type RawRange = (Bound, i64, i64, Bound);

fn range() -> P<RawRange> {
    lower_delimiter()
        .and(signed())
        .and_skip(keyword(","))
        .and(signed())
        .and(upper_delimiter())
        .map(|(((lower, from), to), upper)| (lower, from, to, upper))
}

/// The inclusive bounds denoted by a range. A closed bound is taken as
/// written; an open bound excludes the written value.
fn inclusive_bounds((lower, from, to, upper): RawRange) -> Result<(i64, i64), String> {
    let lb = match lower {
        Bound::Closed => Some(from),
        Bound::Open => from.checked_add(1),
    };
    let ub = match upper {
        Bound::Closed => Some(to),
        Bound::Open => to.checked_sub(1),
    };
    match (lb, ub) {
        (Some(lb), Some(ub)) if lb <= ub => Ok((lb, ub)),
        (Some(_), Some(_)) => Err(format!(
            "empty input range: no integer lies between {from} and {to}"
        )),
        _ => Err(format!(
            "empty input range: open bounds {from} and {to} leave the 64-bit range"
        )),
    }
}

fn input() -> P<ApoExp> {
    keyword("?")
        .skip_and(range().optional())
        .flat_map(|range| match range {
            None => pure(ApoExp::unbounded_input()),
            Some(range) => match inclusive_bounds(range) {
                Ok((from, to)) => pure(ApoExp::input(from, to)),
                Err(message) => fail(message),
            },
        })
}

/// How deeply parentheses, negations and `let`s may nest in a program.
pub const MAX_NESTING: usize = 100;

/// `rule` one level below `depth`, built the first time it runs. Past
/// [`MAX_NESTING`] levels this fails instead.
fn nested(depth: usize, rule: fn(usize) -> P<ApoExp>) -> P<ApoExp> {
    rec(move || {
        if depth < MAX_NESTING {
            rule(depth + 1)
        } else {
            fail(format!("expression nested too deeply (more than {MAX_NESTING} levels)"))
        }
    })
}

fn parenthesized(depth: usize) -> P<ApoExp> {
    keyword("(")
        .skip_and(nested(depth, expr_at))
        .and_skip(keyword(")"))
}

fn unary_min(depth: usize) -> P<ApoExp> {
    keyword("-")
        .skip_and(nested(depth, atom))
        .map(ApoExp::unary_min)
}

/// Expressions at the binding power of parentheses.
fn atom(depth: usize) -> P<ApoExp> {
    choice(vec![
        parenthesized(depth),
        input(),
        unary_min(depth),
        natural().map(ApoExp::IntLit),
        identifier().map(ApoExp::Var),
    ])
    .label(|s| format!("expected an expression, got {}", describe(s)))
}

/// `operand (op operand)*`, folded to the left.
fn left_fold(
    operand: P<ApoExp>,
    op: &'static str,
    combine: fn(ApoExp, ApoExp) -> ApoExp,
) -> P<ApoExp> {
    operand
        .clone()
        .and(keyword(op).skip_and(operand).many())
        .map(move |(first, rest)| rest.into_iter().fold(first, combine))
}

/// Expressions at the binding power of multiplication.
fn mult_expr(depth: usize) -> P<ApoExp> {
    left_fold(atom(depth), "*", ApoExp::mult)
}

/// Expressions at the binding power of addition.
fn add_expr(depth: usize) -> P<ApoExp> {
    left_fold(mult_expr(depth), "+", ApoExp::plus)
}

fn let_expr(depth: usize) -> P<ApoExp> {
    keyword("let")
        .skip_and(identifier())
        .and_skip(keyword("="))
        .and(nested(depth, add_expr))
        .and_skip(keyword("in"))
        .and(nested(depth, expr_at))
        .map(|((name, fst), snd)| ApoExp::let_in(name, fst, snd))
}

fn expr_at(depth: usize) -> P<ApoExp> {
    choice(vec![let_expr(depth), add_expr(depth)])
        .label(|s| format!("expected an expression, got {}", describe(s)))
}

pub fn expr() -> P<ApoExp> {
    expr_at(0)
}

/// A whole program: one expression and nothing after it.
pub fn program() -> P<ApoExp> {
    let end = end_of_input()
        .label(|s| format!("expected an operator or end of input, got {}", describe(s)));
    expr().and_skip(end)
}
