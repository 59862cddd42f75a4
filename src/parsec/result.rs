use super::Stream;

/// The outcome of running a parser: a value or an error message, together
/// with the stream left over.
///
/// On failure `remainder` is the position the parser had reached when it
/// gave up, which is what diagnostics point at.
#[derive(Debug, Clone)]
pub enum ParseResult<C, T> {
    Ok { remainder: Stream<C>, value: T },
    Err { remainder: Stream<C>, message: String },
}

impl<C, T> ParseResult<C, T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ParseResult::Ok { .. })
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn remainder(&self) -> &Stream<C> {
        match self {
            ParseResult::Ok { remainder, .. } | ParseResult::Err { remainder, .. } => remainder,
        }
    }

    pub fn map<S>(self, f: impl FnOnce(T) -> S) -> ParseResult<C, S> {
        match self {
            ParseResult::Ok { remainder, value } => ParseResult::Ok {
                remainder,
                value: f(value),
            },
            ParseResult::Err { remainder, message } => ParseResult::Err { remainder, message },
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            ParseResult::Ok { value, .. } => Some(value),
            ParseResult::Err { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<(T, Stream<C>), (String, Stream<C>)> {
        match self {
            ParseResult::Ok { remainder, value } => Ok((value, remainder)),
            ParseResult::Err { remainder, message } => Err((message, remainder)),
        }
    }
}
