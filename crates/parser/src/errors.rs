use crate::first::TokenSet;

use lex::TokenKind;
use thiserror::Error;
use std::fmt;

/// What a grammar rule required at the point it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    OneOf(TokenSet),
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::OneOf(set) => {
                write!(f, "{} (", set.name)?;
                for (i, kind) in set.kinds.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                write!(f, ")")
            }
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected} but found '{found}'")]
    UnexpectedToken { expected: Expected, found: String },
    #[error("expected {expected} but reached end of input")]
    UnexpectedEndOfInput { expected: Expected },
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    #[source]
    pub kind: ParseErrorKind
}

impl ParseError {
    /// What the failing rule required, if the failure was a token mismatch.
    pub fn expected(&self) -> Option<Expected> {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. } => Some(*expected),
            ParseErrorKind::UnexpectedEndOfInput { expected } => Some(*expected),
            ParseErrorKind::NestingTooDeep { .. } => None,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self.kind, ParseErrorKind::UnexpectedEndOfInput { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line: {}, col: {})", self.kind, self.line, self.col)
    }
}
