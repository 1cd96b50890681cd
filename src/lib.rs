//! # Tiny - a front end and interpreter for the TINY language
//!
//! A small pipeline for a minimal imperative language with conditionals,
//! do-until loops, assignment, integer/relational expressions and
//! `read`/`write` I/O. Source text is scanned, parsed into an AST, resolved
//! to variable slots, and executed directly over the tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use tiny_lang::run_source;
//!
//! # fn main() -> tiny_lang::Result<()> {
//! let code = r#"
//!     { factorial of the input }
//!     read x;
//!     if 0 < x then
//!       fact := 1;
//!       repeat
//!         fact := fact * x;
//!         x := x - 1
//!       until x = 0;
//!       write fact
//!     end
//! "#;
//!
//! let output = run_source(code, &[5])?;
//! assert_eq!(output, vec![120]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Stage by stage
//!
//! ```rust
//! use tiny_lang::{resolve, Interpreter, Parser, ScriptedInput};
//!
//! # fn main() -> tiny_lang::Result<()> {
//! // Parse (the parser pulls tokens from the scanner on demand)
//! let mut parser = Parser::from_text("b := 1; a := 2; write a + b")?;
//! let program = parser.parse_program()?;
//!
//! // Resolve variable slots
//! let symbols = resolve(&program);
//! assert_eq!(symbols.slot_of("b"), Some(0));
//! assert_eq!(symbols.slot_of("a"), Some(1));
//!
//! // Execute
//! let mut output: Vec<i64> = Vec::new();
//! let mut interpreter = Interpreter::new(&symbols, ScriptedInput::default(), &mut output);
//! interpreter.execute(&program)?;
//! assert_eq!(output, vec![3]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ```text
//! program     -> stmt_seq
//! stmt_seq    -> stmt { ';' stmt }
//! stmt        -> if_stmt | repeat_stmt | assign_stmt | read_stmt | write_stmt
//! if_stmt     -> 'if' expr 'then' stmt_seq [ 'else' stmt_seq ] 'end'
//! repeat_stmt -> 'repeat' stmt_seq 'until' expr
//! assign_stmt -> ID ':=' expr
//! read_stmt   -> 'read' ID
//! write_stmt  -> 'write' expr
//! expr        -> math_expr [ ('<' | '=') math_expr ]
//! math_expr   -> term { ('+' | '-') term }
//! term        -> factor { ('*' | '/') factor }
//! factor      -> new_expr [ '^' factor ]     (right-associative)
//! new_expr    -> NUM | ID | '(' math_expr ')'
//! ```
//!
//! Comments are `{ ... }` and may span lines. Integers are 64-bit; overflow
//! and division by zero are runtime errors. Blocks, parentheses and operator
//! chains nested deeper than [`LanguageConfig::max_nesting`] are rejected by
//! the parser.
//!
//! ## Architecture
//!
//! ```text
//! LineSource → Scanner → Parser → Program → resolve → SymbolTable → Interpreter
//! ```
//!
//! - [`Scanner`] - Demand-driven tokenizer over a [`LineSource`]
//! - [`Parser`] - Recursive-descent parser producing a [`Program`]
//! - [`resolve`] - Assigns each variable a slot in first-occurrence order
//! - [`Interpreter`] - Executes the tree against [`InputSource`]/[`OutputSink`]
//! - [`Pipeline`] - All of the above behind one configured call
//!
//! ## Error Handling
//!
//! Every stage fails fast with an [`Error`] carrying the offending line:
//!
//! ```rust
//! use tiny_lang::{run_source, Error, Expected, TokenKind};
//!
//! match run_source("if x < 1 then y := 1", &[]) {
//!     Err(Error::SyntaxError { expected, line, .. }) => {
//!         assert_eq!(expected, Expected::Token(TokenKind::End));
//!         assert_eq!(line, 1);
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//!
//! let err = run_source("x := 0; write 10 / x", &[]).unwrap_err();
//! assert!(err.to_string().contains("Division by zero"));
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod runtime;

// Re-export main types
pub use analyzer::{resolve, Resolver, SymbolEntry, SymbolTable};
pub use config::{Config, InterpreterConfig, LanguageConfig, DEFAULT_MAX_NESTING};
pub use error::{Error, Expected, Result, Stage};
pub use lexer::{LineSource, ReaderSource, Scanner, StrSource, Token, TokenKind};
pub use parser::{BinaryOp, ExprType, Expression, NodeKind, Parser, Program, Statement};
pub use pipeline::{run_source, Pipeline, RunReport};
pub use runtime::{
    InputSource, Interpreter, OutputSink, ReaderInput, ScriptedInput, Value, WriterSink,
};

/// Version of the Tiny interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
