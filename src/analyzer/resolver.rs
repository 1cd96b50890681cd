use super::symbol_table::SymbolTable;
use crate::parser::{Expression, Program, Statement};

/// Assign every variable a slot and collect its reference lines
///
/// Pure function of the tree: the walk visits a node, then its children
/// left to right, then the next statement of its sequence, so slots follow
/// first occurrence in source order.
pub fn resolve(program: &Program) -> SymbolTable {
    let mut resolver = Resolver::new();
    resolver.visit_sequence(&program.body);
    let table = resolver.finish();
    tracing::debug!(variables = table.len(), "resolved symbols");
    table
}

/// Single-pass symbol resolver
#[derive(Debug, Default)]
pub struct Resolver {
    table: SymbolTable,
}

impl Resolver {
    /// Creates a resolver with an empty table
    pub fn new() -> Self {
        Resolver::default()
    }

    /// Freeze and return the table
    pub fn finish(self) -> SymbolTable {
        self.table
    }

    /// Visit a statement sequence in order
    pub fn visit_sequence(&mut self, sequence: &[Statement]) {
        for statement in sequence {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expression(condition);
                self.visit_sequence(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_sequence(else_branch);
                }
            }
            Statement::Repeat {
                body, condition, ..
            } => {
                self.visit_sequence(body);
                self.visit_expression(condition);
            }
            Statement::Assign { name, value, line } => {
                self.table.record(name, *line);
                self.visit_expression(value);
            }
            Statement::Read { name, line } => {
                self.table.record(name, *line);
            }
            Statement::Write { value, .. } => self.visit_expression(value),
        }
    }

    fn visit_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Binary { left, right, .. } => {
                self.visit_expression(left);
                self.visit_expression(right);
            }
            Expression::Identifier { name, line } => {
                self.table.record(name, *line);
            }
            Expression::Number { .. } => {}
        }
    }
}
