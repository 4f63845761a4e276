//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! This reduces boilerplate wherever the lexer builds tokens.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$text` - The token's source text
/// * `$start` - Position of the first character
/// * `$end` - Position just past the last character (defaults to `$start`)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42", start, end);
/// let indent = MK_TOKEN!(TokenKind::Indent, "", start);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $start:expr, $end:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            text: $text,
            start: $start,
            end: $end,
        }
    };
    ($kind:expr, $text:expr, $start:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            text: $text,
            start: $start,
            end: $start,
        }
    };
}
