use std::fmt;

use crate::parser::ExprType;

/// Result of evaluating an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Arithmetic result
    Int(i64),
    /// Comparison result
    Bool(bool),
}

impl Value {
    /// Integer form; booleans coerce to 0/1
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Bool(b) => i64::from(*b),
        }
    }

    /// Expression type this value belongs to
    pub fn type_of(&self) -> ExprType {
        match self {
            Value::Int(_) => ExprType::Integer,
            Value::Bool(_) => ExprType::Boolean,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_coerces_to_int() {
        assert_eq!(Value::Bool(true).as_int(), 1);
        assert_eq!(Value::Bool(false).as_int(), 0);
        assert_eq!(Value::Int(-7).as_int(), -7);
        assert_eq!(Value::Bool(true).to_string(), "1");
        assert_eq!(Value::Bool(false).type_of(), ExprType::Boolean);
    }
}
