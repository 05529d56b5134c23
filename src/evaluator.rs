use tracing::debug;

use crate::arithmetic;
use crate::error::EvalError;
use crate::normalizer::{collapse_signs, strip_unary_plus};
use crate::types::{Number, Operator, OperatorTier, SubExpression};

#[derive(Debug, Clone, Copy)]
enum Scan {
    Leftmost,
    Rightmost,
}

/// Tiers in the order they are reduced, each with its search direction.
/// Exponent is right-associative, so `2^3^2` reduces `3^2` first.
const SELECTION: [(OperatorTier, Scan); 3] = [
    (OperatorTier::Exponent, Scan::Rightmost),
    (OperatorTier::MulDivMod, Scan::Leftmost),
    (OperatorTier::AddSub, Scan::Leftmost),
];

fn is_operator_byte(b: u8) -> bool {
    matches!(b, b'+' | b'-' | b'*' | b'/' | b'%' | b'^')
}

/// A `-` at the start or right after another operator negates its operand.
fn is_binary_at(bytes: &[u8], i: usize) -> bool {
    is_operator_byte(bytes[i]) && !(bytes[i] == b'-' && (i == 0 || is_operator_byte(bytes[i - 1])))
}

pub fn count_operators(expr: &str) -> usize {
    let bytes = expr.as_bytes();
    (0..bytes.len()).filter(|&i| is_binary_at(bytes, i)).count()
}

/// Index of the operator to apply next, if any.
pub fn select_operator(expr: &str) -> Option<usize> {
    let bytes = expr.as_bytes();
    let matches_tier = |tier: OperatorTier, i: usize| {
        tier.operators().contains(&(bytes[i] as char)) && is_binary_at(bytes, i)
    };
    SELECTION.iter().find_map(|&(tier, scan)| match scan {
        Scan::Leftmost => (0..bytes.len()).find(|&i| matches_tier(tier, i)),
        Scan::Rightmost => (0..bytes.len()).rev().find(|&i| matches_tier(tier, i)),
    })
}

/// Widen an operator position to `operand <op> operand`.
pub fn sub_expression(expr: &str, operator: usize) -> SubExpression {
    let bytes = expr.as_bytes();

    let mut left = operator;
    while left > 0 && !is_operator_byte(bytes[left - 1]) {
        left -= 1;
    }
    if left == 1 && bytes[0] == b'-' {
        left = 0;
    }

    let mut right = operator + 1;
    if bytes.get(right) == Some(&b'-') {
        right += 1;
    }
    while right < bytes.len() && !is_operator_byte(bytes[right]) {
        right += 1;
    }

    SubExpression { left, operator, right }
}

/// Parse a signed decimal operand. Exponents, `inf` and `nan` are not numbers here.
pub fn parse_operand(text: &str) -> Result<f64, EvalError> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let well_formed = !unsigned.is_empty()
        && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && unsigned.bytes().any(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(EvalError::MalformedOperand(text.to_string()));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| EvalError::MalformedOperand(text.to_string()))?;
    if value.is_finite() { Ok(value) } else { Err(EvalError::Overflow) }
}

fn compute(expr: &str, span: SubExpression) -> Result<Number, EvalError> {
    let (a, b) = span.operands(expr);
    let symbol = expr[span.operator..].chars().next().unwrap_or('?');
    let op = Operator::try_from(symbol)?;
    let value = arithmetic::apply(op, parse_operand(a)?, parse_operand(b)?)?;
    Ok(Number::new(value))
}

/// Reduce a bracket-free expression to a single number.
///
/// Each step picks one operator, computes its sub-expression and writes the
/// result back over exactly that span. When `steps` is given and the
/// expression is not `nested` inside brackets, the state after every step is
/// recorded.
pub fn reduce(
    expr: &str,
    nested: bool,
    mut steps: Option<&mut Vec<String>>,
) -> Result<Number, EvalError> {
    // Substituting a negative result after a minus leaves `--` behind.
    let mut current = strip_unary_plus(&collapse_signs(expr));

    for _ in 0..count_operators(&current) {
        let Some(position) = select_operator(&current) else {
            break;
        };
        let span = sub_expression(&current, position);
        let value = compute(&current, span)?;
        debug!(sub_expression = span.text(&current), %value, "reduced");
        current.replace_range(span.left..span.right, &value.to_string());

        if !nested {
            if let Some(steps) = steps.as_deref_mut() {
                steps.push(current.clone());
            }
        }
    }

    if current.is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    parse_operand(&current).map(Number::new)
}
