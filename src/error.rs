use thiserror::Error as ThisError;

/// Rejection raised before any arithmetic happens.
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("expression can not be blank")]
    EmptyInput,

    #[error("invalid character '{ch}' at position {position}, only 0-9 . + - * / ^ % ( ) [ ] {{ }} are allowed")]
    InvalidCharacter { ch: char, position: usize },

    #[error("expression has leading or trailing operator(s)")]
    LeadingOrTrailingOperator,

    #[error("bracket mismatch")]
    UnbalancedBrackets,

    #[error("ambiguous bracket at position {position}, an operator is required before and/or after brackets")]
    AmbiguousBrackets { position: usize },

    #[error("double operator at position {position}")]
    DoubleOperator { position: usize },

    #[error("division by 0 at position {position}, can not divide or MOD by 0")]
    LiteralDivideByZero { position: usize },

    #[error("invalid number '{literal}', more than one decimal point")]
    MalformedNumber { literal: String },
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "EmptyInput",
            ValidationError::InvalidCharacter { .. } => "InvalidCharacter",
            ValidationError::LeadingOrTrailingOperator => "LeadingOrTrailingOperator",
            ValidationError::UnbalancedBrackets => "UnbalancedBrackets",
            ValidationError::AmbiguousBrackets { .. } => "AmbiguousBrackets",
            ValidationError::DoubleOperator { .. } => "DoubleOperator",
            ValidationError::LiteralDivideByZero { .. } => "LiteralDivideByZero",
            ValidationError::MalformedNumber { .. } => "MalformedNumber",
        }
    }
}

/// Failure raised while reducing an already validated expression.
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("division by zero encountered while calculating {dividend} / 0")]
    DivisionByZero { dividend: f64 },

    #[error("modulo by zero encountered while calculating {dividend} % 0")]
    ModuloByZero { dividend: f64 },

    #[error("{base} ^ {exponent} results in a complex number (not supported)")]
    ComplexResult { base: f64, exponent: f64 },

    #[error("result too large to represent")]
    Overflow,

    #[error("unknown operator '{0}'")]
    UnknownOperator(char),

    #[error("malformed operand '{0}'")]
    MalformedOperand(String),

    #[error("nothing left to evaluate")]
    EmptyExpression,
}

impl EvalError {
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::DivisionByZero { .. } => "DivisionByZero",
            EvalError::ModuloByZero { .. } => "ModuloByZero",
            EvalError::ComplexResult { .. } => "ComplexResult",
            EvalError::Overflow => "Overflow",
            EvalError::UnknownOperator(_) => "UnknownOperator",
            EvalError::MalformedOperand(_) => "MalformedOperand",
            EvalError::EmptyExpression => "EmptyExpression",
        }
    }
}

/// Either family, as returned by the full pipeline.
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(e) => e.kind(),
            Error::Eval(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_kinds() {
        let e: Error = EvalError::DivisionByZero { dividend: 5.0 }.into();
        assert_eq!(e.kind(), "DivisionByZero");
        assert_eq!(e.to_string(), "division by zero encountered while calculating 5 / 0");

        let v: Error = ValidationError::InvalidCharacter { ch: 'a', position: 3 }.into();
        assert_eq!(v.kind(), "InvalidCharacter");
        assert!(v.to_string().starts_with("invalid character 'a' at position 3"));
    }
}
