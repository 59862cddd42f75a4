use super::{pure, satisfy, Parser};

pub fn satisfy_char(
    pred: impl Fn(char) -> bool + 'static,
    on_err: impl Fn(char) -> String + 'static,
) -> Parser<char, char> {
    satisfy(move |c: &char| pred(*c), move |c: &char| on_err(*c))
}

pub fn one_of(chars: &str) -> Parser<char, char> {
    let chars = chars.to_owned();
    let shown = chars.clone();
    satisfy_char(
        move |c| chars.contains(c),
        move |c| format!("expected one of [{shown}], got '{c}'"),
    )
}

pub fn none_of(chars: &str) -> Parser<char, char> {
    let chars = chars.to_owned();
    let shown = chars.clone();
    satisfy_char(
        move |c| !chars.contains(c),
        move |c| format!("expected none of [{shown}], got '{c}'"),
    )
}

pub fn letter() -> Parser<char, char> {
    satisfy_char(char::is_alphabetic, |c| format!("expected letter, got '{c}'"))
}

pub fn digit() -> Parser<char, char> {
    satisfy_char(|c| c.is_ascii_digit(), |c| format!("expected digit, got '{c}'"))
}

pub fn chr(expected: char) -> Parser<char, char> {
    satisfy_char(
        move |c| c == expected,
        move |c| format!("expected '{expected}', got '{c}'"),
    )
}

/// The exact text `s`, failing from the starting position on a mismatch.
pub fn string(s: &str) -> Parser<char, String> {
    let owned = s.to_owned();
    s.chars()
        .map(chr)
        .fold(pure(()), |acc, p| acc.and_skip(p))
        .map(move |()| owned.clone())
        .try_or_rewind()
}

/// Optional run of whitespace.
pub fn whitespace() -> Parser<char, ()> {
    satisfy_char(char::is_whitespace, |c| format!("expected whitespace, got '{c}'"))
        .many()
        .map(|_| ())
}
