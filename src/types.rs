use serde::Serialize;
use std::fmt::{Display, Formatter};

use crate::error::EvalError;

/// Every operator the calculator understands, in no particular order.
pub const OPERATORS: &[char] = &['+', '-', '*', '/', '%', '^'];
pub const OPENERS: &[char] = &['(', '[', '{'];
pub const CLOSERS: &[char] = &[')', ']', '}'];

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

pub fn is_opener(c: char) -> bool {
    OPENERS.contains(&c)
}

pub fn is_closer(c: char) -> bool {
    CLOSERS.contains(&c)
}

/// A calculator value. Always finite; `-0` is folded into `0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    pub fn new(value: f64) -> Self {
        if value == 0.0 { Number(0.0) } else { Number(value) }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_integer(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::new(value)
    }
}

// f64's Display never switches to exponent notation and prints whole values
// without a fractional part, so the text can always be scanned again.
impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatorTier {
    AddSub,
    MulDivMod,
    Exponent,
}

impl OperatorTier {
    pub const fn operators(self) -> &'static [char] {
        match self {
            OperatorTier::Exponent => &['^'],
            OperatorTier::MulDivMod => &['*', '/', '%'],
            OperatorTier::AddSub => &['+', '-'],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl Operator {
    pub fn tier(self) -> OperatorTier {
        match self {
            Operator::Pow => OperatorTier::Exponent,
            Operator::Mul | Operator::Div | Operator::Mod => OperatorTier::MulDivMod,
            Operator::Add | Operator::Sub => OperatorTier::AddSub,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Mod => '%',
            Operator::Pow => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = EvalError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Sub),
            '*' => Ok(Operator::Mul),
            '/' => Ok(Operator::Div),
            '%' => Ok(Operator::Mod),
            '^' => Ok(Operator::Pow),
            other => Err(EvalError::UnknownOperator(other)),
        }
    }
}

/// Byte span of `operand <op> operand` inside a flat expression.
/// `left..right` covers the whole sub-expression, `operator` is the index of
/// the operator character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubExpression {
    pub left: usize,
    pub operator: usize,
    pub right: usize,
}

impl SubExpression {
    pub fn text(self, expr: &str) -> &str {
        &expr[self.left..self.right]
    }

    pub fn operands(self, expr: &str) -> (&str, &str) {
        (&expr[self.left..self.operator], &expr[self.operator + 1..self.right])
    }
}

/// Result of a traced evaluation: the value plus every intermediate state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub value: Number,
    pub steps: Vec<String>,
}
