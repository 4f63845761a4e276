use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Fatal errors abort the scan; the rest are recovered from.
    pub fn is_fatal(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::InconsistentDedent { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::InconsistentDedent { .. } => "InconsistentDedent",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString { quote } => ErrorTip::Suggestion(format!(
                "String opened here is never closed, add a matching `{}` before the end of the line",
                quote
            )),
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::InconsistentDedent { width, expected } => ErrorTip::Suggestion(format!(
                "Dedent to width {} does not match any enclosing block, expected one of {:?}",
                width, expected
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unterminated string literal opened with {quote:?}")]
    UnterminatedString { quote: char },
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("inconsistent dedent to width {width}")]
    InconsistentDedent { width: usize, expected: Vec<usize> },
}

/// Failure value of `analyze`: every error found in one pass, alongside the
/// best-effort token sequence.
#[derive(Error, Debug, Clone)]
#[error("{} lexical error(s), first: {}", .errors.len(), .errors.first().map(ToString::to_string).unwrap_or_default())]
pub struct LexErrors<'src> {
    pub errors: Vec<Error>,
    pub partial: Vec<Token<'src>>,
}

impl<'src> LexErrors<'src> {
    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(Error::is_fatal)
    }
}
