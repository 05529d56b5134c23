use crate::error::EvalError;
use crate::types::Operator;
use tracing::warn;

/// Decimal digits kept on exponent results.
const POW_DECIMALS: i32 = 9;

pub fn apply(op: Operator, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        Operator::Add => add(a, b),
        Operator::Sub => sub(a, b),
        Operator::Mul => mul(a, b),
        Operator::Div => div(a, b),
        Operator::Mod => modulo(a, b),
        Operator::Pow => pow(a, b),
    }
}

pub fn add(a: f64, b: f64) -> Result<f64, EvalError> {
    finite(a + b)
}

pub fn sub(a: f64, b: f64) -> Result<f64, EvalError> {
    finite(a - b)
}

pub fn mul(a: f64, b: f64) -> Result<f64, EvalError> {
    finite(a * b)
}

pub fn div(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::DivisionByZero { dividend: a });
    }
    finite(a / b)
}

/// Floored remainder: the result takes the sign of the divisor.
pub fn modulo(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::ModuloByZero { dividend: a });
    }
    let mut r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r += b;
    }
    finite(r)
}

pub fn pow(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent == 0.0 {
        warn!("0^0 is undefined, treating as 1");
        return Ok(1.0);
    }
    // Real-valued calculator: no complex roots of negative numbers.
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalError::ComplexResult { base, exponent });
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero { dividend: 1.0 });
    }

    let answer = base.powf(exponent);
    if answer.is_nan() {
        return Err(EvalError::ComplexResult { base, exponent });
    }
    if answer.is_infinite() {
        return Err(EvalError::Overflow);
    }
    Ok(round_decimals(answer, POW_DECIMALS))
}

fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Past 2^53 there is no fractional part left to round.
    if !scaled.is_finite() || scaled.abs() >= 9.0e15 {
        return value;
    }
    scaled.round() / factor
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() { Ok(value) } else { Err(EvalError::Overflow) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operations() {
        assert_eq!(apply(Operator::Add, 2.0, 3.0), Ok(5.0));
        assert_eq!(apply(Operator::Sub, 2.0, 3.0), Ok(-1.0));
        assert_eq!(apply(Operator::Mul, 2.5, 4.0), Ok(10.0));
        assert_eq!(apply(Operator::Div, 9.0, 2.0), Ok(4.5));
    }

    #[test]
    fn division_and_modulo_by_zero() {
        assert_eq!(div(5.0, 0.0), Err(EvalError::DivisionByZero { dividend: 5.0 }));
        assert_eq!(modulo(5.0, 0.0), Err(EvalError::ModuloByZero { dividend: 5.0 }));
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        assert_eq!(modulo(7.0, 3.0), Ok(1.0));
        assert_eq!(modulo(-7.0, 3.0), Ok(2.0));
        assert_eq!(modulo(7.0, -3.0), Ok(-2.0));
        assert_eq!(modulo(6.0, 3.0), Ok(0.0));
    }

    #[test]
    fn exponent_policies() {
        assert_eq!(pow(0.0, 0.0), Ok(1.0));
        assert_eq!(pow(2.0, 10.0), Ok(1024.0));
        assert_eq!(pow(9.0, 0.5), Ok(3.0));
        assert_eq!(pow(-2.0, 3.0), Ok(-8.0));
        assert_eq!(pow(2.0, -1.0), Ok(0.5));
        assert!(matches!(pow(-8.0, 0.5), Err(EvalError::ComplexResult { .. })));
        assert_eq!(pow(10.0, 400.0), Err(EvalError::Overflow));
        assert!(matches!(pow(0.0, -1.0), Err(EvalError::DivisionByZero { .. })));
    }

    #[test]
    fn exponent_results_are_rounded() {
        assert_eq!(pow(2.0, 0.5), Ok(1.414213562));
        assert_eq!(pow(1.1, 2.0), Ok(1.21));
    }

    #[test]
    fn overflow_on_other_operations() {
        assert_eq!(mul(1e308, 10.0), Err(EvalError::Overflow));
        assert_eq!(add(f64::MAX, f64::MAX), Err(EvalError::Overflow));
    }
}
