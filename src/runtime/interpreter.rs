use super::io::{InputSource, OutputSink};
use super::value::Value;
use crate::analyzer::SymbolTable;
use crate::config::InterpreterConfig;
use crate::error::{Error, Result};
use crate::parser::{BinaryOp, ExprType, Expression, Program, Statement};

/// Tree-walking interpreter for Tiny programs
///
/// Owns one integer per resolved variable slot, all starting at 0. `read`
/// pulls from the input source, `write` pushes to the output sink; nothing
/// else has side effects.
pub struct Interpreter<'t, I, O> {
    /// Frozen name → slot table
    symbols: &'t SymbolTable,
    /// Variable values indexed by slot
    values: Vec<i64>,
    /// Source for `read`
    input: I,
    /// Sink for `write`
    output: O,
    /// Execution limits
    config: InterpreterConfig,
    /// Repeat-loop passes so far
    iterations: usize,
}

impl<'t, I: InputSource, O: OutputSink> Interpreter<'t, I, O> {
    /// Creates an interpreter with default limits
    pub fn new(symbols: &'t SymbolTable, input: I, output: O) -> Self {
        Interpreter::with_config(symbols, input, output, InterpreterConfig::default())
    }

    /// Creates an interpreter with explicit limits
    pub fn with_config(
        symbols: &'t SymbolTable,
        input: I,
        output: O,
        config: InterpreterConfig,
    ) -> Self {
        Interpreter {
            symbols,
            values: vec![0; symbols.len()],
            input,
            output,
            config,
            iterations: 0,
        }
    }

    /// Run a program to completion or to its first fault
    pub fn execute(&mut self, program: &Program) -> Result<()> {
        self.execute_sequence(&program.body)?;
        tracing::debug!(
            variables = self.values.len(),
            iterations = self.iterations,
            "program finished"
        );
        Ok(())
    }

    /// Current variable values, by slot
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Current value of a named variable
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.symbols.slot_of(name).map(|slot| self.values[slot])
    }

    /// Tear down into values, input and output
    pub fn into_parts(self) -> (Vec<i64>, I, O) {
        (self.values, self.input, self.output)
    }

    fn execute_sequence(&mut self, sequence: &[Statement]) -> Result<()> {
        for statement in sequence {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    fn execute_statement(&mut self, statement: &Statement) -> Result<()> {
        tracing::trace!(kind = %statement.kind(), line = statement.line(), "execute");

        match statement {
            Statement::Assign { name, value, line } => {
                let slot = self.slot(name, *line)?;
                let value = self.evaluate(value)?;
                self.values[slot] = value.as_int();
            }

            Statement::Read { name, line } => {
                let slot = self.slot(name, *line)?;
                let value = self.input.read_int(name, *line)?;
                tracing::trace!(name = %name, value, "read");
                self.values[slot] = value;
            }

            Statement::Write { value, .. } => {
                let value = self.evaluate(value)?;
                tracing::trace!(value = value.as_int(), "write");
                self.output.write_value(value.as_int())?;
            }

            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_bool(condition)? {
                    self.execute_sequence(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute_sequence(else_branch)?;
                }
            }

            // Do-until: the body always runs once, and loops while the
            // condition is false.
            Statement::Repeat {
                body,
                condition,
                line,
            } => loop {
                self.execute_sequence(body)?;
                self.count_iteration(*line)?;
                if self.evaluate_bool(condition)? {
                    break;
                }
            },
        }

        Ok(())
    }

    /// Evaluate in whatever mode the expression's type calls for
    fn evaluate(&self, expr: &Expression) -> Result<Value> {
        match expr.expr_type() {
            ExprType::Boolean => self.evaluate_bool(expr).map(Value::Bool),
            _ => self.evaluate_int(expr).map(Value::Int),
        }
    }

    fn evaluate_int(&self, expr: &Expression) -> Result<i64> {
        match expr {
            Expression::Number { value, .. } => Ok(*value),

            Expression::Identifier { name, line } => {
                let slot = self.slot(name, *line)?;
                Ok(self.values[slot])
            }

            Expression::Binary {
                op,
                left,
                right,
                ty,
                line,
            } => {
                if *ty != ExprType::Integer || op.is_relational() {
                    return Err(Error::RuntimeTypeError {
                        expected: ExprType::Integer,
                        found: mismatched_type(expr, ExprType::Integer),
                        line: *line,
                    });
                }
                let lhs = self.evaluate_int(left)?;
                let rhs = self.evaluate_int(right)?;
                apply_arithmetic(*op, lhs, rhs, *line)
            }
        }
    }

    fn evaluate_bool(&self, expr: &Expression) -> Result<bool> {
        match expr {
            Expression::Binary {
                op: op @ (BinaryOp::Equal | BinaryOp::LessThan),
                left,
                right,
                ty: ExprType::Boolean,
                ..
            } => {
                let lhs = self.evaluate_int(left)?;
                let rhs = self.evaluate_int(right)?;
                Ok(if *op == BinaryOp::Equal {
                    lhs == rhs
                } else {
                    lhs < rhs
                })
            }
            _ => Err(Error::RuntimeTypeError {
                expected: ExprType::Boolean,
                found: mismatched_type(expr, ExprType::Boolean),
                line: expr.line(),
            }),
        }
    }

    fn slot(&self, name: &str, line: usize) -> Result<usize> {
        self.symbols
            .slot_of(name)
            .ok_or_else(|| Error::UnresolvedReference {
                name: name.to_string(),
                line,
            })
    }

    fn count_iteration(&mut self, line: usize) -> Result<()> {
        self.iterations += 1;
        match self.config.max_loop_iterations {
            Some(limit) if self.iterations > limit => Err(Error::TooManyIterations { limit, line }),
            _ => Ok(()),
        }
    }
}

/// Type actually found where `expected` was required
///
/// A node tagged with the expected type but carrying the wrong operator is
/// reported by what its operator produces.
fn mismatched_type(expr: &Expression, expected: ExprType) -> ExprType {
    match expr {
        Expression::Binary { op, ty, .. } if *ty == expected => op.result_type(),
        _ => expr.expr_type(),
    }
}

/// Apply an arithmetic operator in the checked integer domain
pub fn apply_arithmetic(op: BinaryOp, lhs: i64, rhs: i64, line: usize) -> Result<i64> {
    let overflow = || Error::ArithmeticOverflow { op, line };

    match op {
        BinaryOp::Plus => lhs.checked_add(rhs).ok_or_else(overflow),
        BinaryOp::Minus => lhs.checked_sub(rhs).ok_or_else(overflow),
        BinaryOp::Times => lhs.checked_mul(rhs).ok_or_else(overflow),
        BinaryOp::Divide => {
            if rhs == 0 {
                return Err(Error::DivisionByZero { line });
            }
            lhs.checked_div(rhs).ok_or_else(overflow)
        }
        BinaryOp::Power => power(lhs, rhs, line),
        BinaryOp::Equal | BinaryOp::LessThan => Err(Error::RuntimeTypeError {
            expected: ExprType::Integer,
            found: ExprType::Boolean,
            line,
        }),
    }
}

/// Integer power; negative exponents truncate the real result toward zero
fn power(base: i64, exponent: i64, line: usize) -> Result<i64> {
    let odd = exponent % 2 != 0;

    if exponent < 0 {
        return match base {
            0 => Err(Error::DivisionByZero { line }),
            1 => Ok(1),
            -1 => Ok(if odd { -1 } else { 1 }),
            _ => Ok(0),
        };
    }

    match u32::try_from(exponent) {
        Ok(exp) => base.checked_pow(exp).ok_or(Error::ArithmeticOverflow {
            op: BinaryOp::Power,
            line,
        }),
        Err(_) => match base {
            0 | 1 => Ok(base),
            -1 => Ok(if odd { -1 } else { 1 }),
            _ => Err(Error::ArithmeticOverflow {
                op: BinaryOp::Power,
                line,
            }),
        },
    }
}
