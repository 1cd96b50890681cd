//! Tiny Parser Module
//!
//! Recursive-descent parsing of the token stream into an Abstract Syntax Tree.

mod ast;
mod grammar;
mod printer;

pub use ast::{BinaryOp, ExprType, Expression, NodeKind, Program, Statement};
pub use grammar::Parser;
