use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::ErrorImpl, Position};

use super::tokens::{Token, TokenKind, DELIMITER_LOOKUP, OPERATOR_LOOKUP, RESERVED_LOOKUP};

lazy_static! {
    static ref WHITESPACE_PATTERN: Regex = Regex::new(r"^[ \t\x0C]+").unwrap();
    static ref NEWLINE_PATTERN: Regex = Regex::new(r"^(\r\n|\n|\r)").unwrap();
    static ref LINE_COMMENT_PATTERN: Regex = Regex::new(r"^#[^\r\n]*").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?").unwrap();
    static ref IDENTIFIER_PATTERN: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
}

/// What the text at the front of a lookahead window turned out to be.
///
/// Every variant carries the exact slice it consumed, so the scanner can
/// advance its position over it character by character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matched<'src> {
    Whitespace(&'src str),
    Newline(&'src str),
    Comment(&'src str),
    Token(TokenKind, &'src str),
    Error(ErrorImpl, &'src str),
}

impl<'src> Matched<'src> {
    pub fn text(&self) -> &'src str {
        match self {
            Matched::Whitespace(text)
            | Matched::Newline(text)
            | Matched::Comment(text)
            | Matched::Token(_, text)
            | Matched::Error(_, text) => text,
        }
    }
}

pub type MatchHandler = for<'src> fn(&'src str) -> Option<Matched<'src>>;

/// Stateless classifier over a lookahead window.
///
/// Handlers are tried in priority order and the first one that recognises
/// the front of the window wins.
#[derive(Clone)]
pub struct PatternMatcher {
    handlers: Vec<MatchHandler>,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        PatternMatcher::new()
    }
}

impl PatternMatcher {
    pub fn new() -> PatternMatcher {
        PatternMatcher {
            handlers: vec![
                whitespace_handler,
                newline_handler,
                comment_handler,
                string_handler,
                number_handler,
                identifier_handler,
                operator_handler,
                delimiter_handler,
            ],
        }
    }

    /// Classifies the front of `window`. Returns `None` only for an empty
    /// window; anything unrecognised comes back as an error consuming one
    /// character.
    pub fn classify<'src>(&self, window: &'src str) -> Option<Matched<'src>> {
        let first = window.chars().next()?;

        for handler in self.handlers.iter() {
            if let Some(matched) = handler(window) {
                return Some(matched);
            }
        }

        Some(Matched::Error(
            ErrorImpl::UnrecognisedCharacter { character: first },
            &window[..first.len_utf8()],
        ))
    }

    /// Classifies the front of `window` and builds the token it produces, if
    /// any. Whitespace, comments and errors produce no token.
    pub fn match_pattern<'src>(&self, window: &'src str, start: Position) -> Option<Token<'src>> {
        match self.classify(window)? {
            Matched::Token(kind, text) => Some(Token::new(kind, text, start)),
            Matched::Newline(text) => Some(Token::new(TokenKind::Newline, text, start)),
            _ => None,
        }
    }

    pub fn match_whitespace<'src>(&self, window: &'src str) -> Option<&'src str> {
        whitespace_handler(window).map(|matched| matched.text())
    }

    pub fn match_newline<'src>(&self, window: &'src str) -> Option<&'src str> {
        newline_handler(window).map(|matched| matched.text())
    }

    pub fn match_comment<'src>(&self, window: &'src str) -> Option<&'src str> {
        comment_handler(window).map(|matched| matched.text())
    }

    pub fn match_string<'src>(&self, window: &'src str) -> Option<Matched<'src>> {
        string_handler(window)
    }

    pub fn match_number<'src>(&self, window: &'src str) -> Option<&'src str> {
        number_handler(window).map(|matched| matched.text())
    }

    pub fn match_identifier<'src>(&self, window: &'src str) -> Option<(TokenKind, &'src str)> {
        match identifier_handler(window)? {
            Matched::Token(kind, text) => Some((kind, text)),
            _ => None,
        }
    }

    pub fn match_operator<'src>(&self, window: &'src str) -> Option<(TokenKind, &'src str)> {
        match operator_handler(window)? {
            Matched::Token(kind, text) => Some((kind, text)),
            _ => None,
        }
    }

    pub fn match_delimiter<'src>(&self, window: &'src str) -> Option<(TokenKind, &'src str)> {
        match delimiter_handler(window)? {
            Matched::Token(kind, text) => Some((kind, text)),
            _ => None,
        }
    }
}

fn whitespace_handler(window: &str) -> Option<Matched<'_>> {
    WHITESPACE_PATTERN
        .find(window)
        .map(|found| Matched::Whitespace(found.as_str()))
}

fn newline_handler(window: &str) -> Option<Matched<'_>> {
    NEWLINE_PATTERN
        .find(window)
        .map(|found| Matched::Newline(found.as_str()))
}

fn comment_handler(window: &str) -> Option<Matched<'_>> {
    if let Some(found) = LINE_COMMENT_PATTERN.find(window) {
        return Some(Matched::Comment(found.as_str()));
    }

    let delimiter = if window.starts_with("\"\"\"") {
        "\"\"\""
    } else if window.starts_with("'''") {
        "'''"
    } else {
        return None;
    };

    // An unclosed block runs to the end of the input.
    let end = window[3..]
        .find(delimiter)
        .map(|offset| 3 + offset + 3)
        .unwrap_or(window.len());

    Some(Matched::Comment(&window[..end]))
}

fn string_handler(window: &str) -> Option<Matched<'_>> {
    let quote = window.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }

    let mut chars = window.char_indices().skip(1);

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => {
                // The escaped character belongs to the literal, whatever it is.
                if chars.next().is_none() {
                    break;
                }
            }
            '\n' | '\r' => break,
            ch if ch == quote => {
                return Some(Matched::Token(TokenKind::String, &window[..offset + 1]));
            }
            _ => {}
        }
    }

    Some(Matched::Error(
        ErrorImpl::UnterminatedString { quote },
        &window[..quote.len_utf8()],
    ))
}

fn number_handler(window: &str) -> Option<Matched<'_>> {
    NUMBER_PATTERN
        .find(window)
        .map(|found| Matched::Token(TokenKind::Number, found.as_str()))
}

fn identifier_handler(window: &str) -> Option<Matched<'_>> {
    let value = IDENTIFIER_PATTERN.find(window)?.as_str();

    if let Some(kind) = RESERVED_LOOKUP.get(value) {
        Some(Matched::Token(*kind, value))
    } else {
        Some(Matched::Token(TokenKind::Identifier, value))
    }
}

fn operator_handler(window: &str) -> Option<Matched<'_>> {
    for len in [2, 1] {
        if let Some(candidate) = window.get(..len) {
            if let Some(kind) = OPERATOR_LOOKUP.get(candidate) {
                return Some(Matched::Token(*kind, candidate));
            }
        }
    }

    None
}

fn delimiter_handler(window: &str) -> Option<Matched<'_>> {
    let candidate = window.get(..1)?;

    DELIMITER_LOOKUP
        .get(candidate)
        .map(|kind| Matched::Token(*kind, candidate))
}
