//! Arithmetic operators for in-place cell modification

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An operator accepted when modifying a numeric cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `//`, division rounded towards negative infinity
    FloorDivide,
}

/// Operator symbols and what they map to
const OPERATORS: &[(&str, ArithmeticOp)] = &[
    ("+", ArithmeticOp::Add),
    ("-", ArithmeticOp::Subtract),
    ("*", ArithmeticOp::Multiply),
    ("/", ArithmeticOp::Divide),
    ("//", ArithmeticOp::FloorDivide),
];

impl ArithmeticOp {
    /// Look up an operator by symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(s, _)| *s == symbol.trim())
            .map(|(_, op)| *op)
    }

    /// The operator's symbol
    pub fn symbol(&self) -> &'static str {
        OPERATORS
            .iter()
            .find(|(_, op)| op == self)
            .map(|(s, _)| *s)
            .unwrap_or("?")
    }

    /// Apply `lhs <op> rhs`
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64> {
        match self {
            ArithmeticOp::Add => Ok(lhs + rhs),
            ArithmeticOp::Subtract => Ok(lhs - rhs),
            ArithmeticOp::Multiply => Ok(lhs * rhs),
            ArithmeticOp::Divide | ArithmeticOp::FloorDivide if rhs == 0.0 => {
                Err(Error::DivisionByZero)
            }
            ArithmeticOp::Divide => Ok(lhs / rhs),
            ArithmeticOp::FloorDivide => Ok((lhs / rhs).floor()),
        }
    }
}

impl FromStr for ArithmeticOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_symbol(s).ok_or_else(|| Error::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
