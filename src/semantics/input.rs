use std::io::{BufRead, Write};

use super::EvaluationError;

/// Where the concrete semantics gets the values of inputs from.
pub trait InputProvider {
    /// Produce a value in `from..=to`.
    fn request_bounded_integer(&mut self, from: i64, to: i64) -> Result<i64, EvaluationError>;
}

impl<T: InputProvider + ?Sized> InputProvider for &mut T {
    fn request_bounded_integer(&mut self, from: i64, to: i64) -> Result<i64, EvaluationError> {
        (**self).request_bounded_integer(from, to)
    }
}

/// Answers 0, 1, 2, ... in turn, each clipped to the requested range.
#[derive(Clone, Debug, Default)]
pub struct CountingInput {
    next: i64,
}

impl CountingInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputProvider for CountingInput {
    fn request_bounded_integer(&mut self, from: i64, to: i64) -> Result<i64, EvaluationError> {
        if from > to {
            return Err(EvaluationError::EmptyRange { from, to });
        }
        let cur = self.next;
        self.next = self.next.saturating_add(1);
        Ok(cur.clamp(from, to))
    }
}

/// Asks for every input on `writer` and reads the answers, one per line,
/// from `reader`. Asks again until it gets a number in range.
pub struct PromptInput<R, W> {
    reader: R,
    writer: W,
}

fn io_error(e: std::io::Error) -> EvaluationError {
    EvaluationError::Input(e.to_string())
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        PromptInput { reader, writer }
    }
}

impl<R: BufRead, W: Write> InputProvider for PromptInput<R, W> {
    fn request_bounded_integer(&mut self, from: i64, to: i64) -> Result<i64, EvaluationError> {
        if from > to {
            return Err(EvaluationError::EmptyRange { from, to });
        }
        loop {
            writeln!(self.writer, "> Enter a number between {from} and {to}").map_err(io_error)?;
            write!(self.writer, "< ").map_err(io_error)?;
            self.writer.flush().map_err(io_error)?;

            let mut line = String::new();
            if self.reader.read_line(&mut line).map_err(io_error)? == 0 {
                return Err(EvaluationError::Input("input ended".to_owned()));
            }
            match line.trim().parse::<i64>() {
                Ok(value) if (from..=to).contains(&value) => return Ok(value),
                _ => writeln!(
                    self.writer,
                    "'{}' is not a number between {from} and {to}",
                    line.trim()
                )
                .map_err(io_error)?,
            }
        }
    }
}
