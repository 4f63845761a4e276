//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, LexErrors};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '@' },
        Position::new(1, 10, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert!(!error.is_fatal());
}

#[test]
fn test_error_position() {
    let pos = Position::new(3, 7, 20);
    let error = Error::new(ErrorImpl::UnterminatedString { quote: '"' }, pos);

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_unterminated_string_error() {
    let error = Error::new(
        ErrorImpl::UnterminatedString { quote: '\'' },
        Position::start(),
    );

    assert_eq!(error.get_error_name(), "UnterminatedString");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`'`")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_inconsistent_dedent_is_fatal() {
    let error = Error::new(
        ErrorImpl::InconsistentDedent {
            width: 2,
            expected: vec![0, 4],
        },
        Position::new(3, 2, 14),
    );

    assert_eq!(error.get_error_name(), "InconsistentDedent");
    assert!(error.is_fatal());
    assert!(error.get_tip().to_string().contains("[0, 4]"));
}

#[test]
fn test_unrecognised_character_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '$' },
        Position::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '?' },
        Position::new(2, 4, 9),
    );

    assert_eq!(
        error.to_string(),
        "unrecognised character: '?' at line 2, column 4"
    );
}

#[test]
fn test_lex_errors_display() {
    let errors = LexErrors {
        errors: vec![
            Error::new(
                ErrorImpl::UnrecognisedCharacter { character: '@' },
                Position::new(1, 0, 0),
            ),
            Error::new(
                ErrorImpl::UnrecognisedCharacter { character: '$' },
                Position::new(1, 2, 2),
            ),
        ],
        partial: vec![],
    };

    assert!(!errors.has_fatal());
    assert_eq!(
        errors.to_string(),
        "2 lexical error(s), first: unrecognised character: '@' at line 1, column 0"
    );
}
