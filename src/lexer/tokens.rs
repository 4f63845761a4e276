use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, MK_TOKEN};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("def", TokenKind::Def);
        map.insert("class", TokenKind::Class);
        map.insert("return", TokenKind::Return);
        map.insert("import", TokenKind::Import);
        map.insert("from", TokenKind::From);
        map.insert("as", TokenKind::As);
        map.insert("try", TokenKind::Try);
        map.insert("except", TokenKind::Except);
        map.insert("finally", TokenKind::Finally);
        map.insert("raise", TokenKind::Raise);
        map
    };

    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("**", TokenKind::Power);
        map.insert("+=", TokenKind::PlusAssign);
        map.insert("-=", TokenKind::MinusAssign);
        map.insert("==", TokenKind::Equals);
        map.insert("!=", TokenKind::NotEquals);
        map.insert(">=", TokenKind::GreaterEqual);
        map.insert("<=", TokenKind::LessEqual);
        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Minus);
        map.insert("*", TokenKind::Multiply);
        map.insert("/", TokenKind::Divide);
        map.insert("%", TokenKind::Modulo);
        map.insert("=", TokenKind::Assign);
        map.insert(">", TokenKind::Greater);
        map.insert("<", TokenKind::Less);
        map
    };

    pub static ref DELIMITER_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("(", TokenKind::LParen);
        map.insert(")", TokenKind::RParen);
        map.insert("{", TokenKind::LBrace);
        map.insert("}", TokenKind::RBrace);
        map.insert("[", TokenKind::LBracket);
        map.insert("]", TokenKind::RBracket);
        map.insert(",", TokenKind::Comma);
        map.insert(".", TokenKind::Dot);
        map.insert(":", TokenKind::Colon);
        map.insert(";", TokenKind::Semicolon);
        map
    };

    static ref NUMBER_SHAPE: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap();
    static ref IDENTIFIER_SHAPE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Keywords
    If,
    Else,
    While,
    For,
    Def,
    Class,
    Return,
    Import,
    From,
    As,
    Try,
    Except,
    Finally,
    Raise,

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,        // **
    Assign,       // =
    PlusAssign,   // +=
    MinusAssign,  // -=
    Equals,       // ==
    NotEquals,    // !=
    Greater,
    Less,
    GreaterEqual, // >=
    LessEqual,    // <=

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    Semicolon,

    Identifier,
    Number,
    String,
    Comment,
    Newline,
    Indent,
    Dedent,
    End,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Def
                | TokenKind::Class
                | TokenKind::Return
                | TokenKind::Import
                | TokenKind::From
                | TokenKind::As
                | TokenKind::Try
                | TokenKind::Except
                | TokenKind::Finally
                | TokenKind::Raise
        )
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Modulo
                | TokenKind::Power
                | TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Greater
                | TokenKind::Less
                | TokenKind::GreaterEqual
                | TokenKind::LessEqual
        )
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::Colon
                | TokenKind::Semicolon
        )
    }

    /// Synthetic kinds do not correspond to a source substring.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent | TokenKind::End)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Def => "DEF",
            TokenKind::Class => "CLASS",
            TokenKind::Return => "RETURN",
            TokenKind::Import => "IMPORT",
            TokenKind::From => "FROM",
            TokenKind::As => "AS",
            TokenKind::Try => "TRY",
            TokenKind::Except => "EXCEPT",
            TokenKind::Finally => "FINALLY",
            TokenKind::Raise => "RAISE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::Power => "POWER",
            TokenKind::Assign => "ASSIGN",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::Equals => "EQUALS",
            TokenKind::NotEquals => "NOT_EQUALS",
            TokenKind::Greater => "GREATER",
            TokenKind::Less => "LESS",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Comment => "COMMENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::End => "END",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified slice of source text.
///
/// `text` borrows from the source buffer. Equality only looks at the kind,
/// the text and the start line/column.
#[derive(Debug, Clone, Copy)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: Position,
    pub end: Position,
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.text == other.text
            && self.start.line == other.start.line
            && self.start.column == other.start.column
    }
}

impl Eq for Token<'_> {}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token({}, '{}' @ line {}, column {})",
            self.kind, self.text, self.start.line, self.start.column
        )
    }
}

impl<'src> Token<'src> {
    /// Builds a token spanning `text` from `start`; the end position is
    /// derived by advancing over the text.
    pub fn new(kind: TokenKind, text: &'src str, start: Position) -> Self {
        let mut end = start.copy();
        end.advance_str(text);

        MK_TOKEN!(kind, text, start, end)
    }

    /// Keyword when `text` is reserved, IDENTIFIER otherwise.
    pub fn keyword_or_identifier(text: &'src str, start: Position) -> Self {
        let kind = RESERVED_LOOKUP
            .get(text)
            .copied()
            .unwrap_or(TokenKind::Identifier);

        Token::new(kind, text, start)
    }

    pub fn operator(text: &'src str, start: Position) -> Option<Self> {
        OPERATOR_LOOKUP
            .get(text)
            .map(|kind| Token::new(*kind, text, start))
    }

    pub fn delimiter(text: &'src str, start: Position) -> Option<Self> {
        DELIMITER_LOOKUP
            .get(text)
            .map(|kind| Token::new(*kind, text, start))
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    pub fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }

    pub fn is_delimiter(&self) -> bool {
        self.kind.is_delimiter()
    }

    pub fn matches(&self, kind: TokenKind, text: Option<&str>) -> bool {
        self.kind == kind && text.map_or(true, |text| self.text == text)
    }

    /// Checks that the text has the lexical shape its kind requires.
    pub fn validate(&self) -> bool {
        match self.kind {
            TokenKind::Number => NUMBER_SHAPE.is_match(self.text),
            TokenKind::String => is_quoted(self.text),
            TokenKind::Identifier => IDENTIFIER_SHAPE.is_match(self.text),
            _ => true,
        }
    }
}

fn is_quoted(text: &str) -> bool {
    if text.len() < 2 {
        return false;
    }

    let first = text.as_bytes()[0];
    let last = text.as_bytes()[text.len() - 1];

    (first == b'"' || first == b'\'') && first == last
}
