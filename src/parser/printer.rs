//! Indented debug dump of the syntax tree
//!
//! One node per line: `[Kind]`, then `[Operator]`, `[value]` or `[name]`
//! where the node has one, then `[Integer]`/`[Boolean]` for typed nodes.
//! Children sit three columns deeper than their parent; statements of the
//! same sequence share an indent.

use std::fmt::{self, Write};

use super::ast::{ExprType, Expression, Program, Statement};

const INDENT: usize = 3;

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_sequence(f, &self.body, 0)
    }
}

fn write_sequence(f: &mut impl Write, sequence: &[Statement], depth: usize) -> fmt::Result {
    for statement in sequence {
        write_statement(f, statement, depth)?;
    }
    Ok(())
}

fn write_statement(f: &mut impl Write, statement: &Statement, depth: usize) -> fmt::Result {
    write!(f, "{:width$}[{}]", "", statement.kind(), width = depth)?;
    match statement {
        Statement::Assign { name, .. } | Statement::Read { name, .. } => write!(f, "[{}]", name)?,
        _ => {}
    }
    writeln!(f)?;

    let child = depth + INDENT;
    match statement {
        Statement::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            write_expression(f, condition, child)?;
            write_sequence(f, then_branch, child)?;
            if let Some(else_branch) = else_branch {
                write_sequence(f, else_branch, child)?;
            }
        }
        Statement::Repeat {
            body, condition, ..
        } => {
            write_sequence(f, body, child)?;
            write_expression(f, condition, child)?;
        }
        Statement::Assign { value, .. } | Statement::Write { value, .. } => {
            write_expression(f, value, child)?;
        }
        Statement::Read { .. } => {}
    }
    Ok(())
}

fn write_expression(f: &mut impl Write, expr: &Expression, depth: usize) -> fmt::Result {
    write!(f, "{:width$}[{}]", "", expr.kind(), width = depth)?;
    match expr {
        Expression::Binary { op, .. } => write!(f, "[{}]", op.token_kind())?,
        Expression::Number { value, .. } => write!(f, "[{}]", value)?,
        Expression::Identifier { name, .. } => write!(f, "[{}]", name)?,
    }
    if expr.expr_type() != ExprType::Void {
        write!(f, "[{}]", expr.expr_type())?;
    }
    writeln!(f)?;

    if let Expression::Binary { left, right, .. } = expr {
        write_expression(f, left, depth + INDENT)?;
        write_expression(f, right, depth + INDENT)?;
    }
    Ok(())
}
