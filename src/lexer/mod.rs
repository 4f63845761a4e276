//! Lexical analysis module.
//!
//! This module contains the lexer that converts Python-like source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Classification of text using regex patterns and lookup tables
//! - Recognition of keywords, identifiers, literals, operators and delimiters
//! - Indentation tracking with synthesized INDENT and DEDENT tokens
//! - Comments and whitespace handling
//! - Error recovery that keeps position tracking intact

pub mod patterns;
pub mod scanner;
pub mod tokens;
