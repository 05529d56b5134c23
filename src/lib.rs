pub mod arithmetic;
pub mod batch;
pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod resolver;
pub mod types;
pub mod validator;

pub use batch::evaluate_batch;
pub use error::{Error, EvalError, ValidationError};
pub use normalizer::normalize;
pub use types::{Evaluation, Number, Operator, OperatorTier, SubExpression};
pub use validator::{Notice, Validated};

/// Check an expression without normalizing it first.
pub fn validate(expr: &str) -> Result<String, ValidationError> {
    validator::validate(expr)
}

/// Normalize raw input, then validate it.
pub fn validate_and_normalize(raw: &str) -> Result<String, ValidationError> {
    validator::validate(&normalize(raw))
}

/// Evaluate an already validated expression to a number.
pub fn evaluate(expression: &str) -> Result<Number, EvalError> {
    resolver::resolve(expression, None)
}

/// Evaluate an already validated expression, keeping every intermediate state.
pub fn evaluate_traced(expression: &str) -> Result<Evaluation, EvalError> {
    let mut steps = Vec::new();
    let value = resolver::resolve(expression, Some(&mut steps))?;
    Ok(Evaluation { value, steps })
}

/// Normalize, validate and evaluate raw input.
pub fn calculate(raw: &str) -> Result<Number, Error> {
    let expression = validate_and_normalize(raw)?;
    Ok(evaluate(&expression)?)
}
