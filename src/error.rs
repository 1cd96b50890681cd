//! Error types for the Tiny pipeline

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexer::TokenKind;
use crate::parser::{BinaryOp, ExprType};

/// Tiny pipeline errors
///
/// Every variant is fatal for the run that raised it: the stage that detects
/// the fault stops and hands the error back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Collaborator errors
    /// The character source or output sink failed
    #[error("I/O error: {message}")]
    Io {
        /// Description of the underlying failure
        message: String,
    },

    /// A tree or table could not be rendered as JSON
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the underlying failure
        message: String,
    },

    /// Invalid configuration
    ///
    /// **Triggered by:** an equality lexeme that clashes with the rest of the
    /// token vocabulary, or a zero lexeme length or nesting limit
    #[error("Invalid configuration: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    // Scan / parse errors
    /// Unrecognized character (or over-long lexeme) reached the parser
    ///
    /// **Triggered by:** a character outside the token vocabulary
    /// **Example:** `x := 3 # 4`
    #[error("Lexical error at line {line}: unexpected '{lexeme}'")]
    LexicalError {
        /// Offending text
        lexeme: String,
        /// Line number where it was found
        line: usize,
    },

    /// A `{` comment was never closed
    #[error("Unterminated comment starting before line {line}")]
    UnterminatedComment {
        /// Line where the scanner gave up
        line: usize,
    },

    /// Actual token does not match the grammar at the current position
    ///
    /// **Triggered by:** any grammar violation; the first one aborts the parse
    /// **Example:** `if x < 1 then y := 1` (missing `end`)
    #[error("Syntax error at line {line}: expected {expected}, found {found}")]
    SyntaxError {
        /// What the grammar required here
        expected: Expected,
        /// Lexeme of the token actually found
        found: String,
        /// Line of the offending token
        line: usize,
    },

    /// Blocks, parentheses or operator chains nested past the configured limit
    ///
    /// **Triggered by:** input such as `write ((((...1...))))` deeper than
    /// `LanguageConfig::max_nesting`
    #[error("Nesting too deep at line {line} (limit: {limit})")]
    NestingTooDeep {
        /// Configured limit
        limit: usize,
        /// Line of the token that went past it
        line: usize,
    },

    /// Number literal does not fit the integer domain
    #[error("Invalid number literal '{lexeme}' at line {line}")]
    InvalidNumber {
        /// Literal text
        lexeme: String,
        /// Line of the literal
        line: usize,
    },

    // Runtime errors
    /// Name missing from the symbol table at execution time
    ///
    /// **Triggered by:** executing a program against a symbol table that was
    /// not produced by resolving that same program
    #[error("Unresolved reference to '{name}' at line {line}")]
    UnresolvedReference {
        /// Variable name
        name: String,
        /// Line of the reference
        line: usize,
    },

    /// Expression evaluated in a mode inconsistent with its type
    ///
    /// **Example:** `if x then write 1 end` (condition is an integer)
    #[error("Type error at line {line}: expected {expected} expression, got {found}")]
    RuntimeTypeError {
        /// Type the context requires
        expected: ExprType,
        /// Type the expression carries
        found: ExprType,
        /// Line of the expression
        line: usize,
    },

    /// Division by zero (or zero raised to a negative power)
    #[error("Division by zero at line {line}")]
    DivisionByZero {
        /// Line of the operator
        line: usize,
    },

    /// Arithmetic result not representable as an integer
    #[error("Arithmetic overflow in '{op}' at line {line}")]
    ArithmeticOverflow {
        /// Operator that overflowed
        op: BinaryOp,
        /// Line of the operator
        line: usize,
    },

    /// The input source could not supply an integer
    #[error("Input error reading '{name}' at line {line}: {message}")]
    InputError {
        /// Variable being read
        name: String,
        /// Line of the read statement
        line: usize,
        /// Failure description
        message: String,
    },

    /// Repeat loops ran past the configured iteration limit
    #[error("Too many loop iterations at line {line} (limit: {limit})")]
    TooManyIterations {
        /// Configured limit
        limit: usize,
        /// Line of the repeat statement
        line: usize,
    },
}

/// What the parser required at the point a syntax error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expected {
    /// A specific token kind
    Token(TokenKind),
    /// The start of a statement
    Statement,
    /// The start of a factor: number, identifier or `(`
    Factor,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "\"{}\"", kind),
            Expected::Statement => write!(f, "statement"),
            Expected::Factor => write!(f, "number, identifier or \"(\""),
        }
    }
}

/// Pipeline stage that detects an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking the configuration, before any input is read
    Config,
    /// Reading characters / tokens
    Scan,
    /// Recursive-descent parsing
    Parse,
    /// Tree-walking execution
    Execute,
    /// Rendering trees and tables for output
    Report,
}

impl Error {
    /// Create an I/O error from anything displayable
    pub fn io(err: impl fmt::Display) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }

    /// Create a serialization error from anything displayable
    pub fn serialization(err: impl fmt::Display) -> Self {
        Error::Serialization {
            message: err.to_string(),
        }
    }

    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config {
            message: msg.into(),
        }
    }

    /// Classify which stage raised the error
    pub fn stage(&self) -> Stage {
        match self {
            Error::Io { .. } => Stage::Scan,
            Error::Config { .. } => Stage::Config,
            Error::Serialization { .. } => Stage::Report,

            Error::LexicalError { .. }
            | Error::UnterminatedComment { .. }
            | Error::SyntaxError { .. }
            | Error::NestingTooDeep { .. }
            | Error::InvalidNumber { .. } => Stage::Parse,

            Error::UnresolvedReference { .. }
            | Error::RuntimeTypeError { .. }
            | Error::DivisionByZero { .. }
            | Error::ArithmeticOverflow { .. }
            | Error::InputError { .. }
            | Error::TooManyIterations { .. } => Stage::Execute,
        }
    }

    /// Source line the error refers to, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Io { .. } | Error::Config { .. } | Error::Serialization { .. } => None,
            Error::LexicalError { line, .. }
            | Error::UnterminatedComment { line }
            | Error::SyntaxError { line, .. }
            | Error::NestingTooDeep { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::UnresolvedReference { line, .. }
            | Error::RuntimeTypeError { line, .. }
            | Error::DivisionByZero { line }
            | Error::ArithmeticOverflow { line, .. }
            | Error::InputError { line, .. }
            | Error::TooManyIterations { line, .. } => Some(*line),
        }
    }
}

/// Result type for Tiny operations
pub type Result<T> = std::result::Result<T, Error>;
