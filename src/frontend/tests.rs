use super::*;
use crate::parsec::Parser;
use crate::semantics::{
    evaluate_closed, Concrete, CountingInput, Initial, Interval, IntervalAnalysis,
};
use crate::syntax::ApoExp;
use crate::syntax::ApoExp::*;

fn parse_successfully(input: &str) -> ApoExp {
    match parse(input) {
        Ok(exp) => exp,
        Err(e) => panic!("expected successful parse of {input:?}, but failed with: {e}"),
    }
}

fn parse_error(input: &str) -> SyntaxError {
    match parse(input) {
        Ok(exp) => panic!("expected failed parse of {input:?}, but got {exp:?}"),
        Err(e) => e,
    }
}

fn eval(exp: &ApoExp) -> i64 {
    match evaluate_closed(&mut Concrete::new(CountingInput::new()), exp) {
        Ok(value) => value,
        Err(e) => panic!("evaluation of {exp} failed: {e}"),
    }
}

fn interval(exp: &ApoExp) -> Interval {
    match evaluate_closed(&mut IntervalAnalysis, exp) {
        Ok(value) => value,
        Err(e) => panic!("interval analysis of {exp} failed: {e}"),
    }
}

fn lit(i: i64) -> ApoExp {
    IntLit(i)
}

#[test]
fn int_expressions() {
    assert_eq!(parse_successfully("20"), lit(20));
    assert_eq!(eval(&parse_successfully("22")), 22);
}

#[test]
fn unary_minus() {
    let exp = parse_successfully("-1");
    assert_eq!(exp, ApoExp::unary_min(lit(1)));
    assert_eq!(eval(&exp), -1);

    let exp = parse_successfully("--1");
    assert_eq!(exp, ApoExp::unary_min(ApoExp::unary_min(lit(1))));
    assert_eq!(eval(&exp), 1);
}

#[test]
fn plus_expressions() {
    for input in ["20 + 22", "20+22"] {
        let exp = parse_successfully(input);
        assert_eq!(exp, ApoExp::plus(lit(20), lit(22)));
        assert_eq!(eval(&exp), 42);
    }

    let exp = parse_successfully("1 + 2 + 3");
    assert_eq!(exp, ApoExp::plus(ApoExp::plus(lit(1), lit(2)), lit(3)));
    assert_eq!(eval(&exp), 6);

    parse_error("1 + 2 +");
}

#[test]
fn mult_expressions() {
    let exp = parse_successfully("21 * 2");
    assert_eq!(exp, ApoExp::mult(lit(21), lit(2)));
    assert_eq!(eval(&exp), 42);

    let exp = parse_successfully("1*2*3");
    assert_eq!(exp, ApoExp::mult(ApoExp::mult(lit(1), lit(2)), lit(3)));
    assert_eq!(eval(&exp), 6);

    parse_error("1 * 2 *");
}

#[test]
fn add_and_mult_binding() {
    assert_eq!(
        parse_successfully("37 * 3 + 2"),
        ApoExp::plus(ApoExp::mult(lit(37), lit(3)), lit(2))
    );
    assert_eq!(
        parse_successfully("37*3+2"),
        ApoExp::plus(ApoExp::mult(lit(37), lit(3)), lit(2))
    );
    assert_eq!(
        parse_successfully("2 + 37 * 3"),
        ApoExp::plus(lit(2), ApoExp::mult(lit(37), lit(3)))
    );
    assert_eq!(
        parse_successfully("37 * - 3 + 2"),
        ApoExp::plus(ApoExp::mult(lit(37), ApoExp::unary_min(lit(3))), lit(2))
    );
}

#[test]
fn add_and_mult_binding_with_parens() {
    let exp = parse_successfully("37 * (3 + 2)");
    assert_eq!(exp, ApoExp::mult(lit(37), ApoExp::plus(lit(3), lit(2))));
    assert_eq!(eval(&exp), 37 * (3 + 2));

    let exp = parse_successfully("37 * - (3 + 2)");
    assert_eq!(
        exp,
        ApoExp::mult(lit(37), ApoExp::unary_min(ApoExp::plus(lit(3), lit(2))))
    );
    assert_eq!(eval(&exp), 37 * -(3 + 2));
}

#[test]
fn bare_inputs() {
    let exp = parse_successfully("?");
    assert_eq!(exp, ApoExp::unbounded_input());
    assert_eq!(eval(&exp), 0);

    let exp = parse_successfully("? + ?");
    assert_eq!(
        exp,
        ApoExp::plus(ApoExp::unbounded_input(), ApoExp::unbounded_input())
    );
    assert_eq!(eval(&exp), 1);
}

#[test]
fn range_delimiters() {
    // '[' and ']' include the written bound, '(' and ')' exclude it
    assert_eq!(parse_successfully("?[10,20]"), ApoExp::input(10, 20));
    assert_eq!(parse_successfully("?(10,20]"), ApoExp::input(11, 20));
    assert_eq!(parse_successfully("?[10,20)"), ApoExp::input(10, 19));
    assert_eq!(parse_successfully("?(10,20)"), ApoExp::input(11, 19));

    assert_eq!(parse_successfully("?[1,1]"), ApoExp::input(1, 1));
    assert_eq!(parse_successfully("?(1,2]"), ApoExp::input(2, 2));
    assert_eq!(parse_successfully("?[1,2)"), ApoExp::input(1, 1));
    assert_eq!(parse_successfully("?(0,2)"), ApoExp::input(1, 1));
}

#[test]
fn negative_range_bounds() {
    assert_eq!(parse_successfully("?[-5, 5]"), ApoExp::input(-5, 5));
    assert_eq!(parse_successfully("?(-5, -1)"), ApoExp::input(-4, -2));
    assert_eq!(
        parse_successfully("?[-9223372036854775808, 9223372036854775807]"),
        ApoExp::unbounded_input()
    );
}

#[test]
fn empty_ranges_are_rejected() {
    for input in ["?(1,1)", "?(0,1)", "?[1,1)", "?(1,1]", "?[2,1]"] {
        let e = parse_error(input);
        assert!(e.message.contains("empty input range"), "{input}: {e}");
    }
    let e = parse_error("?(9223372036854775807, 9223372036854775807]");
    assert!(e.message.contains("empty input range"), "{e}");
}

#[test]
fn inputs_with_ranges() {
    let exp = parse_successfully("?[1,1] + ?[1,2)");
    assert_eq!(exp, ApoExp::plus(ApoExp::input(1, 1), ApoExp::input(1, 1)));
    assert_eq!(eval(&exp), 2);
    assert_eq!(interval(&exp), Interval::new(2, 2));

    let exp = parse_successfully("?[0,1) + ?(10,20]");
    assert_eq!(exp, ApoExp::plus(ApoExp::input(0, 0), ApoExp::input(11, 20)));
    // the second input clips to the lower bound of its range
    assert_eq!(eval(&exp), 11);
    assert_eq!(interval(&exp), Interval::new(11, 20));
}

#[test]
fn input_range_is_not_a_parenthesized_expression() {
    assert_eq!(
        parse_successfully("?(1,5) * 2"),
        ApoExp::mult(ApoExp::input(2, 4), lit(2))
    );
    // no range follows, so '?' stands alone and the parentheses are left over
    parse_error("? (3)");
}

#[test]
fn let_in() {
    assert_eq!(eval(&parse_successfully("let x = 1 in x + 2")), 3);
    assert_eq!(eval(&parse_successfully("let x = ? in x + 2")), 2);

    let exp = parse_successfully("let x = ?[0, 100] in x * 2");
    assert_eq!(
        exp,
        ApoExp::let_in(
            "x",
            ApoExp::input(0, 100),
            ApoExp::mult(ApoExp::var("x"), lit(2))
        )
    );
    assert_eq!(interval(&exp), Interval::new(0, 200));

    parse_successfully("let x = ?(0, 100) in x * 2");
    parse_successfully(
        "
        let x = ?(0, 100) in
        x * 2
        ",
    );
}

#[test]
fn let_body_extends_to_the_end() {
    assert_eq!(
        parse_successfully("let x = 1 in let y = x + 1 in x * y"),
        ApoExp::let_in(
            "x",
            lit(1),
            ApoExp::let_in(
                "y",
                ApoExp::plus(ApoExp::var("x"), lit(1)),
                ApoExp::mult(ApoExp::var("x"), ApoExp::var("y"))
            )
        )
    );
    assert_eq!(
        parse_successfully("2 * (let x = 1 in x) + 3"),
        ApoExp::plus(
            ApoExp::mult(lit(2), ApoExp::let_in("x", lit(1), ApoExp::var("x"))),
            lit(3)
        )
    );
    // a let is not an operand without parentheses
    parse_error("2 * let x = 1 in x");
}

#[test]
fn let_inlining() {
    let exp = parse_successfully("let x = ?[0, 100] in let y = x + 1 in y * y");
    let inlined = match evaluate_closed(&mut Initial, &exp) {
        Ok(inlined) => inlined,
        Err(e) => panic!("inlining failed: {e}"),
    };
    assert_eq!(inlined.to_string(), "(?[0, 100] + 1) * (?[0, 100] + 1)");
}

#[test]
fn keywords_are_not_variables() {
    parse_error("let let = 1 in 2");
    parse_error("in");
    assert_eq!(parse_successfully("letter"), ApoExp::var("letter"));
    assert_eq!(parse_successfully("x'"), ApoExp::var("x'"));
}

#[test]
fn unbound_variables_parse_but_fail_to_evaluate() {
    let exp = parse_successfully("x + 1");
    assert!(evaluate_closed(&mut Concrete::new(CountingInput::new()), &exp).is_err());
}

#[test]
fn oversized_literals_are_rejected() {
    let e = parse_error("9223372036854775808");
    assert!(e.message.contains("does not fit"), "{e}");
    assert_eq!(parse_successfully("9223372036854775807"), lit(i64::MAX));
}

#[test]
fn error_positions() {
    let e = parse_error("1 + 2 $ 3");
    assert_eq!((e.line, e.column, e.offset), (1, 7, 6));
    assert!(e.message.contains("'$'"), "{e}");

    let e = parse_error("let x = 1 in\n  x + ");
    assert_eq!((e.line, e.column), (2, 5));

    let e = parse_error("");
    assert_eq!(e.message, "expected an expression, got end of input");

    let e = parse_error("(1 + 2");
    assert_eq!(e.message, "expected ')', got end of input");
    assert_eq!(e.offset, 6);
}

#[test]
fn backtracking_restores_the_token_stream() {
    // both alternatives start with '(' '1'; the first fails on ',' after
    // consuming two tokens, and the second must still see the '('
    let first: Parser<Token, &str> = keyword_seq(&["(", "1", ")"]).map(|_| "paren");
    let second: Parser<Token, &str> = keyword_seq(&["(", "1", ",", "2", ")"]).map(|_| "pair");
    let parser = crate::parsec::choice(vec![first, second]);
    assert_eq!(parser.run(tokenize("(1,2)")).value(), Some("pair"));
}

fn keyword_seq(words: &[&'static str]) -> Parser<Token, ()> {
    words
        .iter()
        .map(|&w| {
            crate::parsec::satisfy(move |t: &Token| t.text == w, move |t| {
                format!("expected {w}, got {t}")
            })
        })
        .fold(crate::parsec::pure(()), |acc, p| acc.and_skip(p))
}

#[test]
fn the_whole_grammar_is_reusable() {
    // the same parser value can be run on many inputs
    let parser = program();
    for (input, value) in [("1 + 2", 3), ("(1 + 2) * 3", 9), ("let a = 2 in a * a", 4)] {
        let exp = match parser.run(tokenize(input)).value() {
            Some(exp) => exp,
            None => panic!("failed to parse {input:?}"),
        };
        assert_eq!(eval(&exp), value);
    }
}

#[test]
fn long_sums_and_products() {
    let source = vec!["1"; 50_000].join(" + ");
    let exp = parse_successfully(&source);
    assert_eq!(eval(&exp), 50_000);
    assert_eq!(interval(&exp), Interval::singleton(50_000));
    assert_eq!(exp.to_string(), source);

    let source = vec!["2 * 1"; 50_000].join(" + ");
    let exp = parse_successfully(&source);
    assert_eq!(eval(&exp), 100_000);
    assert_eq!(exp.to_string(), source);

    let inlined = match evaluate_closed(&mut Initial, &exp) {
        Ok(inlined) => inlined,
        Err(e) => panic!("inlining failed: {e}"),
    };
    assert_eq!(inlined.to_string(), source);
}

#[test]
fn nesting_is_limited() {
    let nest = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(eval(&parse_successfully(&nest(MAX_NESTING))), 1);

    let e = parse_error(&nest(MAX_NESTING + 1));
    assert!(e.message.contains("nested too deeply"), "{e}");
    assert_eq!(e.offset, MAX_NESTING + 1);

    let e = parse_error(&nest(10 * MAX_NESTING));
    assert!(e.message.contains("nested too deeply"), "{e}");

    let e = parse_error(&format!("{}1", "-".repeat(MAX_NESTING + 1)));
    assert!(e.message.contains("nested too deeply"), "{e}");

    let lets = |depth: usize| format!("{}x", "let x = 1 in ".repeat(depth));
    assert_eq!(eval(&parse_successfully(&lets(MAX_NESTING))), 1);
    let e = parse_error(&lets(3 * MAX_NESTING));
    assert!(e.message.contains("nested too deeply"), "{e}");
}
