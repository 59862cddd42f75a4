use std::cell::OnceCell;
use std::fmt::Debug;
use std::iter::once;
use std::rc::Rc;

use itertools::Itertools;

use super::{ParseResult, Stream};

type RunFn<C, T> = dyn Fn(Stream<C>) -> ParseResult<C, T>;

/// A parser of `C`s for a `T`: takes a stream of `C`s, consumes some prefix of
/// it and produces either a `T` or an error message, plus what is left.
///
/// Parsers are pure. Running the same parser on the same stream always gives
/// the same result, and no run can disturb another stream value.
pub struct Parser<C, T> {
    run: Rc<RunFn<C, T>>,
}

impl<C, T> Clone for Parser<C, T> {
    fn clone(&self) -> Self {
        Parser {
            run: self.run.clone(),
        }
    }
}

impl<C: Clone + 'static, T: 'static> Parser<C, T> {
    pub fn new(run: impl Fn(Stream<C>) -> ParseResult<C, T> + 'static) -> Self {
        Parser { run: Rc::new(run) }
    }

    pub fn run(&self, stream: Stream<C>) -> ParseResult<C, T> {
        (self.run)(stream)
    }

    /// Functorial action.
    pub fn map<S: 'static>(self, f: impl Fn(T) -> S + 'static) -> Parser<C, S> {
        Parser::new(move |s| self.run(s).map(&f))
    }

    /// Rewrite the message of a failure.
    pub fn map_err(self, f: impl Fn(String) -> String + 'static) -> Parser<C, T> {
        Parser::new(move |s| match self.run(s) {
            ParseResult::Err { remainder, message } => ParseResult::Err {
                remainder,
                message: f(message),
            },
            ok => ok,
        })
    }

    /// Replace the message of a failure that did not get past the starting
    /// position. Failures deeper in the input keep their own message.
    pub fn label(self, describe: impl Fn(&Stream<C>) -> String + 'static) -> Parser<C, T> {
        Parser::new(move |s: Stream<C>| match self.run(s.clone()) {
            ParseResult::Err { remainder, .. } if remainder.position() == s.position() => {
                ParseResult::Err {
                    message: describe(&s),
                    remainder,
                }
            }
            res => res,
        })
    }

    /// Demote a success to a failure when `pred` rejects its value. The
    /// failure is reported where the rejected value ended.
    pub fn filter(
        self,
        pred: impl Fn(&T) -> bool + 'static,
        on_err: impl Fn(&T) -> String + 'static,
    ) -> Parser<C, T> {
        Parser::new(move |s| match self.run(s) {
            ParseResult::Ok { remainder, value } if !pred(&value) => ParseResult::Err {
                message: on_err(&value),
                remainder,
            },
            res => res,
        })
    }

    /// Monadic action: value-dependent sequencing.
    pub fn flat_map<S: 'static>(self, k: impl Fn(T) -> Parser<C, S> + 'static) -> Parser<C, S> {
        Parser::new(move |s| match self.run(s) {
            ParseResult::Ok { remainder, value } => k(value).run(remainder),
            ParseResult::Err { remainder, message } => ParseResult::Err { remainder, message },
        })
    }

    pub fn and<U: 'static>(self, that: Parser<C, U>) -> Parser<C, (T, U)> {
        Parser::new(move |s| match self.run(s) {
            ParseResult::Ok { remainder, value } => that.run(remainder).map(|u| (value, u)),
            ParseResult::Err { remainder, message } => ParseResult::Err { remainder, message },
        })
    }

    pub fn skip_and<U: 'static>(self, that: Parser<C, U>) -> Parser<C, U> {
        self.and(that).map(|(_, u)| u)
    }

    pub fn and_skip<U: 'static>(self, that: Parser<C, U>) -> Parser<C, T> {
        self.and(that).map(|(t, _)| t)
    }

    /// Try `self`; if it fails, run `that` on the stream `self` started from.
    /// Whatever `self` consumed before failing is forgotten.
    pub fn or(self, that: Parser<C, T>) -> Parser<C, T> {
        Parser::new(move |s: Stream<C>| match self.run(s.clone()) {
            ok @ ParseResult::Ok { .. } => ok,
            ParseResult::Err { .. } => that.run(s),
        })
    }

    /// Run `self` and report a failure from the starting position instead of
    /// wherever it stopped.
    pub fn try_or_rewind(self) -> Parser<C, T> {
        Parser::new(move |s: Stream<C>| match self.run(s.clone()) {
            ParseResult::Err { message, .. } => ParseResult::Err {
                remainder: s,
                message,
            },
            ok => ok,
        })
    }

    /// Zero or more repetitions. The failing attempt that ends the repetition
    /// is rewound, so this never fails.
    ///
    /// `self` must not succeed without consuming input, or this never ends.
    pub fn many(self) -> Parser<C, Vec<T>> {
        Parser::new(move |mut s: Stream<C>| {
            let mut values = vec![];
            while let ParseResult::Ok { remainder, value } = self.run(s.clone()) {
                values.push(value);
                s = remainder;
            }
            ParseResult::Ok {
                remainder: s,
                value: values,
            }
        })
    }

    /// One or more repetitions.
    pub fn plus(self) -> Parser<C, Vec<T>> {
        self.clone()
            .and(self.many())
            .map(|(head, tail)| once(head).chain(tail).collect())
    }

    pub fn optional(self) -> Parser<C, Option<T>> {
        self.map(Some).or(Parser::new(|s| ParseResult::Ok {
            remainder: s,
            value: None,
        }))
    }
}

/// Succeed with `v` without consuming input.
pub fn pure<C: Clone + 'static, T: Clone + 'static>(v: T) -> Parser<C, T> {
    Parser::new(move |s| ParseResult::Ok {
        remainder: s,
        value: v.clone(),
    })
}

/// Fail with `msg` without consuming input.
pub fn fail<C: Clone + 'static, T: 'static>(msg: impl Into<String>) -> Parser<C, T> {
    let msg = msg.into();
    Parser::new(move |s| ParseResult::Err {
        remainder: s,
        message: msg.clone(),
    })
}

/// Build the parser returned by `factory` the first time it is run. Lets
/// grammar rules refer to each other without recursing forever while the
/// grammar is being put together.
pub fn rec<C: Clone + 'static, T: 'static>(
    factory: impl Fn() -> Parser<C, T> + 'static,
) -> Parser<C, T> {
    let cell = OnceCell::new();
    Parser::new(move |s| cell.get_or_init(&factory).run(s))
}

/// Consume one element if it satisfies `pred`, otherwise fail with
/// `on_err(element)` at that element.
pub fn satisfy<C: Clone + 'static>(
    pred: impl Fn(&C) -> bool + 'static,
    on_err: impl Fn(&C) -> String + 'static,
) -> Parser<C, C> {
    Parser::new(move |s: Stream<C>| match s.next() {
        None => ParseResult::Err {
            remainder: s,
            message: "unexpected end of input".to_owned(),
        },
        Some((c, rest)) => {
            if pred(&c) {
                ParseResult::Ok {
                    remainder: rest,
                    value: c,
                }
            } else {
                ParseResult::Err {
                    message: on_err(&c),
                    remainder: s,
                }
            }
        }
    })
}

/// Any single element.
pub fn any<C: Clone + 'static>() -> Parser<C, C> {
    satisfy(|_| true, |_| unreachable!("any() accepts every element"))
}

pub fn exactly<C: Clone + PartialEq + Debug + 'static>(expected: C) -> Parser<C, C> {
    let shown = format!("{expected:?}");
    satisfy(
        move |c| *c == expected,
        move |c| format!("expected {shown}, got {c:?}"),
    )
}

pub fn exactly_seq<C: Clone + PartialEq + Debug + 'static>(expected: Vec<C>) -> Parser<C, Vec<C>> {
    let shown = format!("{expected:?}");
    let premature = shown.clone();
    take_exactly(expected.len())
        .map_err(move |_| format!("expected {premature}, but input ended prematurely"))
        .filter(move |got| *got == expected, move |got| {
            format!("expected {shown}, got {got:?}")
        })
}

/// Succeed only when no elements remain.
pub fn end_of_input<C: Clone + 'static>() -> Parser<C, ()> {
    Parser::new(|s: Stream<C>| {
        if s.is_empty() {
            ParseResult::Ok {
                remainder: s,
                value: (),
            }
        } else {
            ParseResult::Err {
                message: format!(
                    "expected end of input, {} more element(s) remain",
                    s.remaining().len()
                ),
                remainder: s,
            }
        }
    })
}

/// The next `n` elements. Too little input fails from the starting position.
pub fn take_exactly<C: Clone + 'static>(n: usize) -> Parser<C, Vec<C>> {
    Parser::new(move |s: Stream<C>| {
        if s.remaining().len() < n {
            return ParseResult::Err {
                message: format!(
                    "unexpected end of input, wanted {n} element(s) but {} remain",
                    s.remaining().len()
                ),
                remainder: s,
            };
        }
        let mut cur = s;
        let mut taken = Vec::with_capacity(n);
        while taken.len() < n {
            let Some((c, rest)) = cur.next() else {
                unreachable!("length was checked above");
            };
            taken.push(c);
            cur = rest;
        }
        ParseResult::Ok {
            remainder: cur,
            value: taken,
        }
    })
}

/// The current position, without consuming anything.
pub fn position<C: Clone + 'static>() -> Parser<C, usize> {
    Parser::new(|s: Stream<C>| {
        let pos = s.position();
        ParseResult::Ok {
            remainder: s,
            value: pos,
        }
    })
}

/// Left-to-right alternation. The first alternative to succeed wins, and
/// every alternative starts from the same stream.
///
/// If all of them fail, the failure is reported from the furthest position
/// any alternative reached, combining the messages of those that got there.
pub fn choice<C: Clone + 'static, T: 'static>(parsers: Vec<Parser<C, T>>) -> Parser<C, T> {
    Parser::new(move |s: Stream<C>| {
        let mut failures = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            match parser.run(s.clone()) {
                ok @ ParseResult::Ok { .. } => return ok,
                ParseResult::Err { remainder, message } => failures.push((remainder, message)),
            }
        }
        let Some(furthest) = failures.iter().map(|(r, _)| r.position()).max() else {
            return ParseResult::Err {
                remainder: s,
                message: "no alternatives to choose from".to_owned(),
            };
        };
        let (at_furthest, _): (Vec<_>, Vec<_>) = failures
            .into_iter()
            .partition(|(r, _)| r.position() == furthest);
        let message = at_furthest.iter().map(|(_, m)| m).unique().join(" or ");
        let remainder = at_furthest
            .into_iter()
            .next()
            .map_or(s, |(remainder, _)| remainder);
        ParseResult::Err { remainder, message }
    })
}
