//! Lexical analysis for Tiny
//!
//! Converts a line-oriented character source into a lazy stream of tokens.

mod scanner;
mod source;
mod token;

pub use scanner::Scanner;
pub use source::{LineSource, ReaderSource, StrSource};
pub use token::{Token, TokenKind, TokenTable, FIXED_SYMBOLS};
