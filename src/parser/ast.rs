use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::lexer::TokenKind;

/// Complete Tiny program
///
/// The root owns the whole tree; statement sequences are plain vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statement sequence, in source order
    pub body: Vec<Statement>,
}

impl Program {
    /// Machine-readable dump of the tree
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::serialization)
    }

    /// Total number of statements, nested ones included
    pub fn statement_count(&self) -> usize {
        fn count(seq: &[Statement]) -> usize {
            seq.iter()
                .map(|stmt| {
                    1 + match stmt {
                        Statement::If {
                            then_branch,
                            else_branch,
                            ..
                        } => count(then_branch) + else_branch.as_deref().map_or(0, count),
                        Statement::Repeat { body, .. } => count(body),
                        _ => 0,
                    }
                })
                .sum()
        }
        count(&self.body)
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `if expr then stmt_seq [else stmt_seq] end`
    If {
        /// Condition expression (must be relational to execute)
        condition: Expression,
        /// Statements executed when the condition holds
        then_branch: Vec<Statement>,
        /// Statements executed otherwise
        else_branch: Option<Vec<Statement>>,
        /// Line of the `if` keyword
        line: usize,
    },

    /// `repeat stmt_seq until expr`
    Repeat {
        /// Loop body, executed at least once
        body: Vec<Statement>,
        /// Exit condition, checked after each pass
        condition: Expression,
        /// Line of the `repeat` keyword
        line: usize,
    },

    /// `ID := expr`
    Assign {
        /// Target variable
        name: String,
        /// Value expression
        value: Expression,
        /// Line of the target identifier
        line: usize,
    },

    /// `read ID`
    Read {
        /// Target variable
        name: String,
        /// Line of the `read` keyword
        line: usize,
    },

    /// `write expr`
    Write {
        /// Expression to print
        value: Expression,
        /// Line of the `write` keyword
        line: usize,
    },
}

impl Statement {
    /// Source line of the statement's leading token
    pub fn line(&self) -> usize {
        match self {
            Statement::If { line, .. }
            | Statement::Repeat { line, .. }
            | Statement::Assign { line, .. }
            | Statement::Read { line, .. }
            | Statement::Write { line, .. } => *line,
        }
    }

    /// Node kind tag
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::If { .. } => NodeKind::If,
            Statement::Repeat { .. } => NodeKind::Repeat,
            Statement::Assign { .. } => NodeKind::Assign,
            Statement::Read { .. } => NodeKind::Read,
            Statement::Write { .. } => NodeKind::Write,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Binary operation (arithmetic or relational)
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Result type assigned by the parser
        ty: ExprType,
        /// Line of the operator token
        line: usize,
    },

    /// Integer literal
    Number {
        /// Literal value
        value: i64,
        /// Line of the literal
        line: usize,
    },

    /// Variable reference
    Identifier {
        /// Variable name
        name: String,
        /// Line of the reference
        line: usize,
    },
}

impl Expression {
    /// Resolved expression type
    pub fn expr_type(&self) -> ExprType {
        match self {
            Expression::Binary { ty, .. } => *ty,
            Expression::Number { .. } | Expression::Identifier { .. } => ExprType::Integer,
        }
    }

    /// Source line of the node
    pub fn line(&self) -> usize {
        match self {
            Expression::Binary { line, .. }
            | Expression::Number { line, .. }
            | Expression::Identifier { line, .. } => *line,
        }
    }

    /// Node kind tag
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Binary { .. } => NodeKind::Oper,
            Expression::Number { .. } => NodeKind::Num,
            Expression::Identifier { .. } => NodeKind::Id,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Relational
    /// Equality (`=`)
    Equal,
    /// Less than (`<`)
    LessThan,

    // Arithmetic
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Times,
    /// Truncating division (`/`)
    Divide,
    /// Exponentiation (`^`), right-associative
    Power,
}

impl BinaryOp {
    /// Operator for a token kind, if it is one
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Equal => Some(BinaryOp::Equal),
            TokenKind::LessThan => Some(BinaryOp::LessThan),
            TokenKind::Plus => Some(BinaryOp::Plus),
            TokenKind::Minus => Some(BinaryOp::Minus),
            TokenKind::Times => Some(BinaryOp::Times),
            TokenKind::Divide => Some(BinaryOp::Divide),
            TokenKind::Power => Some(BinaryOp::Power),
            _ => None,
        }
    }

    /// Token kind this operator was parsed from
    pub fn token_kind(&self) -> TokenKind {
        match self {
            BinaryOp::Equal => TokenKind::Equal,
            BinaryOp::LessThan => TokenKind::LessThan,
            BinaryOp::Plus => TokenKind::Plus,
            BinaryOp::Minus => TokenKind::Minus,
            BinaryOp::Times => TokenKind::Times,
            BinaryOp::Divide => TokenKind::Divide,
            BinaryOp::Power => TokenKind::Power,
        }
    }

    /// True for comparisons
    pub fn is_relational(&self) -> bool {
        matches!(self, BinaryOp::Equal | BinaryOp::LessThan)
    }

    /// Type of the value this operator produces
    pub fn result_type(&self) -> ExprType {
        if self.is_relational() {
            ExprType::Boolean
        } else {
            ExprType::Integer
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Equal => write!(f, "="),
            BinaryOp::LessThan => write!(f, "<"),
            BinaryOp::Plus => write!(f, "+"),
            BinaryOp::Minus => write!(f, "-"),
            BinaryOp::Times => write!(f, "*"),
            BinaryOp::Divide => write!(f, "/"),
            BinaryOp::Power => write!(f, "^"),
        }
    }
}

/// Expression type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExprType {
    /// Statements
    Void,
    /// Arithmetic values
    Integer,
    /// Comparison results
    Boolean,
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExprType::Void => write!(f, "Void"),
            ExprType::Integer => write!(f, "Integer"),
            ExprType::Boolean => write!(f, "Boolean"),
        }
    }
}

/// Node kind tags, as shown in tree dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// If statement
    If,
    /// Repeat statement
    Repeat,
    /// Assignment
    Assign,
    /// Read statement
    Read,
    /// Write statement
    Write,
    /// Binary operator
    Oper,
    /// Number literal
    Num,
    /// Identifier
    Id,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeKind::If => write!(f, "If"),
            NodeKind::Repeat => write!(f, "Repeat"),
            NodeKind::Assign => write!(f, "Assign"),
            NodeKind::Read => write!(f, "Read"),
            NodeKind::Write => write!(f, "Write"),
            NodeKind::Oper => write!(f, "Oper"),
            NodeKind::Num => write!(f, "Num"),
            NodeKind::Id => write!(f, "ID"),
        }
    }
}
