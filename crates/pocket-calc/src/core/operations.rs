//! Binary arithmetic on decimal-text operands

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four keypad operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (*)
    #[serde(rename = "*")]
    Multiply,
    /// Division (/)
    #[serde(rename = "/")]
    Divide,
}

impl Operation {
    /// Every operator, in keypad column order
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Parses an operator from its keypad character
    pub fn from_char(c: char) -> CalcResult<Self> {
        match c {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' => Ok(Self::Multiply),
            '/' => Ok(Self::Divide),
            other => Err(CalcError::UnknownOperator(other)),
        }
    }

    /// Applies the operator to two numbers
    ///
    /// Fails on division by zero and on any non-finite result.
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        let raw = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };
        check_finite(raw)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(CalcError::UnknownKey(s.to_string())),
        }
    }
}

impl TryFrom<char> for Operation {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

/// Parses decimal operand text into a finite number
///
/// Accepts partial entries such as `"5."` and `"-0."`. Rejects the error
/// marker, empty text, and the `inf`/`NaN` spellings `f64::from_str` would
/// otherwise let through.
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::ParseError(text.to_string())),
    }
}

/// Evaluates `a op b` on operand text
pub fn compute(a: &str, b: &str, op: Operation) -> CalcResult<f64> {
    let x = parse_operand(a)?;
    let y = parse_operand(b)?;
    op.apply(x, y)
}

fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::InvalidResult("NaN".into()))
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}
