//! Error types for lexical analysis.
//!
//! This module defines the errors the scanner can report. It includes:
//!
//! - Error records carrying the source position they were found at
//! - The three lexical error kinds and their messages
//! - Suggestions shown alongside rendered diagnostics
//! - The aggregate failure value returned by `analyze`

pub mod errors;

#[cfg(test)]
mod tests;
