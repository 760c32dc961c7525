use std::{
    error,
    fmt::{self},
    num::ParseIntError,
    result,
    str::Utf8Error,
};

macro_rules! err {
    ($kind:expr, $($arg:tt)*) => {{
		use crate::error::Error;

        let kind = $kind;
        let message = format!($($arg)*);
        return Err(Error::new( kind, message ));
    }};
}

/// Failures while tokenizing a payload. Every variant carries the byte offset of the field
/// that could not be read.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseError {
    InvalidTag { offset: usize },
    InvalidLength { offset: usize },
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    MalformedTail { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::InvalidTag { offset }
            | ParseError::InvalidLength { offset }
            | ParseError::Truncated { offset, .. }
            | ParseError::MalformedTail { offset } => *offset,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MutationError {
    NonNumericAmount,
    LengthOverflow,
    /// Only raised when the caller treats a payload without an amount as fatal.
    AmountFieldAbsent,
}

#[derive(Debug)]
pub enum ErrorKind {
    Parse(ParseError),
    Mutation(MutationError),
    ParseInt(ParseIntError),
    ParseString(Utf8Error),
}

impl ErrorKind {
    /// Short machine readable code, suitable for a response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Parse(ParseError::InvalidTag { .. }) => "INVALID_TAG",
            ErrorKind::Parse(ParseError::InvalidLength { .. }) => "INVALID_LENGTH",
            ErrorKind::Parse(ParseError::Truncated { .. }) => "TRUNCATED",
            ErrorKind::Parse(ParseError::MalformedTail { .. }) => "MALFORMED_TAIL",
            ErrorKind::Mutation(MutationError::NonNumericAmount) => "NON_NUMERIC_AMOUNT",
            ErrorKind::Mutation(MutationError::LengthOverflow) => "LENGTH_OVERFLOW",
            ErrorKind::Mutation(MutationError::AmountFieldAbsent) => "AMOUNT_FIELD_ABSENT",
            ErrorKind::ParseInt(_) => "PARSE_INT",
            ErrorKind::ParseString(_) => "PARSE_STRING",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new<S>(error_kind: ErrorKind, message: S) -> Self
    where
        String: From<S>,
    {
        Self {
            message: message.into(),
            kind: error_kind,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse(_))
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self.kind, ErrorKind::Mutation(_))
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind() {
            ErrorKind::ParseInt(err) => Some(err),
            ErrorKind::ParseString(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Error> for String {
    fn from(error: Error) -> Self {
        error.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ParseIntError> for Error {
    fn from(parse_int_error: ParseIntError) -> Self {
        Self::new(ErrorKind::ParseInt(parse_int_error), "Failed to parse int")
    }
}

impl From<Utf8Error> for Error {
    fn from(error: Utf8Error) -> Self {
        Self::new(ErrorKind::ParseString(error), "Failed to parse string")
    }
}

pub(crate) use err;

pub type Result<T> = result::Result<T, Error>;
