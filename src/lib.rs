#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

pub use lexer::scanner::analyze;

/// A location in the source text.
///
/// `line` is 1-indexed and `column` is 0-indexed, counted in characters.
/// `index` is the byte offset into the source, so a token's text is always
/// `&source[start.index..end.index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, index: usize) -> Self {
        Position {
            line,
            column,
            index,
        }
    }

    /// The position of the first character of any source.
    pub fn start() -> Self {
        Position {
            line: 1,
            column: 0,
            index: 0,
        }
    }

    /// Consumes `current_char`, returning the position just past it.
    ///
    /// A `'\r'` only ends a line when the caller knows no `'\n'` follows it;
    /// use `advance_with_next` or `advance_str` for that.
    pub fn advance(&mut self, current_char: char) -> Position {
        self.advance_with_next(current_char, Some('\n'))
    }

    /// Consumes `current_char` given the character after it. `\n`, `\r\n`
    /// and a lone `\r` each count as exactly one line break.
    pub fn advance_with_next(&mut self, current_char: char, next_char: Option<char>) -> Position {
        self.index += current_char.len_utf8();

        let breaks_line = match current_char {
            '\n' => true,
            '\r' => next_char != Some('\n'),
            _ => false,
        };

        if breaks_line {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        *self
    }

    /// Advances over every character of `text`, in order.
    pub fn advance_str(&mut self, text: &str) -> Position {
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            self.advance_with_next(ch, chars.peek().copied());
        }

        *self
    }

    pub fn copy(&self) -> Position {
        *self
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Returns the 1-indexed line number, the full text of that line, and the
/// byte offset of `position` within it.
pub fn get_line_at_position(content: &str, position: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;
    let mut line_number = 1;
    let mut last = "";

    for line in split_lines_inclusive(content) {
        let end = start + line.len();
        last = line;

        if (start..end).contains(&position) {
            let line_pos = position - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // End of input sits just past the last character.
    if position == content.len() {
        if last.is_empty() || last.ends_with(['\n', '\r']) {
            return Some((line_number, String::new(), 0));
        }
        return Some((line_number - 1, last.to_string(), last.len()));
    }

    None
}

/// Splits after every `\n`, `\r\n` or lone `\r`, keeping the terminators.
fn split_lines_inclusive(content: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;

    std::iter::from_fn(move || {
        let rest = content.get(start..).filter(|rest| !rest.is_empty())?;

        let end = match rest.find(['\n', '\r']) {
            Some(i) if rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };

        start += end;
        Some(&rest[..end])
    })
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 27).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("x = 1", 5).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "x = 1");
        assert_eq!(line_pos, 5);

        assert!(super::get_line_at_position("x", 7).is_none());
    }

    #[test]
    fn test_position_advance() {
        let mut pos = Position::new(1, 1, 1);
        pos.advance('a');
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 2);

        pos.advance('\n');
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.index, 3);
    }

    #[test]
    fn test_position_carriage_returns() {
        let mut pos = Position::start();
        pos.advance_str("a\rb");
        assert_eq!((pos.line, pos.column, pos.index), (2, 1, 3));

        pos.advance_str("\r\nc");
        assert_eq!((pos.line, pos.column, pos.index), (3, 1, 6));

        pos.advance_with_next('\r', None);
        assert_eq!((pos.line, pos.column), (4, 0));
    }

    #[test]
    fn test_get_line_at_position_with_carriage_returns() {
        let content = "ab\rcd\r\nef";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 4).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "cd\r\n");
        assert_eq!(line_pos, 1);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 7).unwrap();
        assert_eq!(line_number, 3);
        assert_eq!(line, "ef");
        assert_eq!(line_pos, 0);

        let (line_number, line, _) = super::get_line_at_position("x\r", 2).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "");
    }

    #[test]
    fn test_position_copy_is_independent() {
        let mut pos = Position::start();
        let snapshot = pos.copy();
        pos.advance_str("ab\nc");

        assert_eq!(snapshot, Position::start());
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.index, 4);
    }

    #[test]
    fn test_position_index_counts_bytes() {
        let mut pos = Position::start();
        pos.advance('é');
        assert_eq!(pos.column, 1);
        assert_eq!(pos.index, 2);
    }
}

/// Prints a caret diagnostic for `error` against the source it came from.
pub fn display_error(error: &Error, source: &str, file_name: &str) {
    /*
        Error: UnrecognisedCharacter
        -> main.py
           |
        20 | a = @
           | ----^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}:{}:{}", file_name, position.line, position.column);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.index) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let column = line_text[..line_pos.min(line_text.len())].chars().count();
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
