use thiserror::Error;
use std::fmt;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("invalid operator '=' (use '<-' for assignment)")]
    BareEquals,
    #[error("invalid character '!' ('!' must be followed by '=')")]
    BareBang,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected line break inside string")]
    NewlineInString,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub col: usize,
    #[source]
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize, col: usize) -> Self {
        Self { line, col, kind }
    }

    /// Fatal errors stop the scanner for good; the rest skip a character and carry on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            LexErrorKind::UnterminatedComment
                | LexErrorKind::UnterminatedString
                | LexErrorKind::NewlineInString
        )
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line: {}, col: {})", self.kind, self.line, self.col)
    }
}
