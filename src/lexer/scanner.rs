use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl, LexErrors},
    Position, MK_TOKEN,
};

use super::{
    patterns::{Matched, PatternMatcher},
    tokens::{Token, TokenKind},
};

/// Tabs advance the indentation width to the next multiple of this.
pub const TAB_WIDTH: usize = 8;

/// Drives a single pass over one source buffer.
///
/// A scanner is good for exactly one `scan_tokens` call; afterwards it is
/// exhausted and further calls return nothing.
pub struct Scanner<'src> {
    source: &'src str,
    position: Position,
    indent_stack: Vec<usize>,
    tokens: Vec<Token<'src>>,
    errors: Vec<Error>,
    matcher: PatternMatcher,
    at_line_start: bool,
    bracket_depth: usize,
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Scanner<'src> {
        Scanner {
            source,
            position: Position::start(),
            indent_stack: vec![0],
            tokens: vec![],
            errors: vec![],
            matcher: PatternMatcher::new(),
            at_line_start: true,
            bracket_depth: 0,
            finished: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    pub fn is_at_end(&self) -> bool {
        self.position.index >= self.source.len()
    }

    fn remainder(&self) -> &'src str {
        let source: &'src str = self.source;
        &source[self.position.index..]
    }

    fn consume(&mut self, text: &str) -> (Position, Position) {
        let start = self.position.copy();
        let end = self.position.advance_str(text);
        (start, end)
    }

    fn push(&mut self, token: Token<'src>) {
        trace!(%token, "token");
        self.tokens.push(token);
    }

    fn record(&mut self, error_impl: ErrorImpl, position: Position) -> Error {
        let error = Error::new(error_impl, position);
        debug!(%error, "lexical error");
        self.errors.push(error.clone());
        error
    }

    /// Scans the whole source, always ending the sequence with exactly one
    /// END token. Errors are collected and available through `errors`.
    #[tracing::instrument(skip(self), fields(len = self.source.len()))]
    pub fn scan_tokens(&mut self) -> Vec<Token<'src>> {
        if self.finished {
            return Vec::new();
        }

        while !self.is_at_end() {
            if self.at_line_start {
                if let Err(error) = self.scan_line_start() {
                    debug!(%error, "aborting scan");
                    break;
                }
                continue;
            }

            self.scan_token();
        }

        self.finish();
        std::mem::take(&mut self.tokens)
    }

    /// Skips blank and comment-only lines, then applies the indentation of
    /// the first logical line found.
    fn scan_line_start(&mut self) -> Result<(), Error> {
        let leading = self.matcher.match_whitespace(self.remainder()).unwrap_or("");
        let width = measure_indent(leading);
        self.consume(leading);

        loop {
            let window = self.remainder();

            if window.is_empty() {
                return Ok(());
            }

            if let Some(skipped) = self
                .matcher
                .match_comment(window)
                .or_else(|| self.matcher.match_whitespace(window))
            {
                self.consume(skipped);
                continue;
            }

            if let Some(newline) = self.matcher.match_newline(window) {
                self.consume(newline);
                return Ok(());
            }

            break;
        }

        self.at_line_start = false;
        self.apply_indent(width)
    }

    fn apply_indent(&mut self, width: usize) -> Result<(), Error> {
        let top = self.indent_stack.last().copied().unwrap_or(0);
        let position = self.position;

        if width > top {
            trace!(width, "indent");
            self.indent_stack.push(width);
            self.push(MK_TOKEN!(TokenKind::Indent, "", position));
            return Ok(());
        }

        let levels = self.indent_stack.clone();

        while let Some(&top) = self.indent_stack.last() {
            if top <= width {
                break;
            }

            trace!(top, width, "dedent");
            self.indent_stack.pop();
            self.push(MK_TOKEN!(TokenKind::Dedent, "", position));
        }

        if self.indent_stack.last().copied() == Some(width) {
            return Ok(());
        }

        Err(self.record(
            ErrorImpl::InconsistentDedent {
                width,
                expected: levels,
            },
            position,
        ))
    }

    fn scan_token(&mut self) {
        let Some(matched) = self.matcher.classify(self.remainder()) else {
            return;
        };

        let (start, end) = self.consume(matched.text());

        match matched {
            Matched::Whitespace(_) | Matched::Comment(_) => {}
            Matched::Newline(text) => {
                // Newlines inside brackets join lines.
                if self.bracket_depth == 0 {
                    self.push(MK_TOKEN!(TokenKind::Newline, text, start, end));
                    self.at_line_start = true;
                }
            }
            Matched::Token(kind, text) => {
                match kind {
                    TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                        self.bracket_depth += 1;
                    }
                    TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                        self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    }
                    _ => {}
                }

                self.push(MK_TOKEN!(kind, text, start, end));
            }
            Matched::Error(error_impl, _) => {
                self.record(error_impl, start);
            }
        }
    }

    fn finish(&mut self) {
        let position = self.position;

        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(MK_TOKEN!(TokenKind::Dedent, "", position));
        }

        self.push(MK_TOKEN!(TokenKind::End, "", position));
        self.finished = true;

        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "scan finished"
        );
    }
}

fn measure_indent(leading: &str) -> usize {
    leading.chars().fold(0, |width, ch| match ch {
        '\t' => (width / TAB_WIDTH + 1) * TAB_WIDTH,
        '\x0C' => 0,
        _ => width + 1,
    })
}

/// Converts `source` into tokens.
///
/// On success the sequence ends with exactly one END token. When any error is
/// found, every error from the pass is returned together with the partial
/// sequence, which is also END-terminated.
#[tracing::instrument(skip(source), fields(len = source.len()))]
pub fn analyze(source: &str) -> Result<Vec<Token<'_>>, LexErrors<'_>> {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    let errors = scanner.take_errors();

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(LexErrors {
            errors,
            partial: tokens,
        })
    }
}
