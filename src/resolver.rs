use crate::error::EvalError;
use crate::evaluator::reduce;
use crate::types::{is_closer, is_opener, Number};

/// Span `(open, close)` of the innermost, leftmost bracket group.
///
/// The first closer in the string has no opener between it and its partner,
/// so the nearest opener to its left is always the right one regardless of
/// bracket kind.
pub fn innermost_brackets(expr: &str) -> Option<(usize, usize)> {
    let close = expr.find(is_closer)?;
    let open = expr[..close].rfind(is_opener)?;
    Some((open, close))
}

/// Evaluate an expression that may contain brackets.
///
/// Bracket groups are reduced innermost first and their text replaced with
/// the result until none remain; the flat remainder is reduced last.
pub fn resolve(expr: &str, mut steps: Option<&mut Vec<String>>) -> Result<Number, EvalError> {
    let mut current = expr.to_string();
    loop {
        if let Some(steps) = steps.as_deref_mut() {
            steps.push(current.clone());
        }

        let Some((open, close)) = innermost_brackets(&current) else {
            return reduce(&current, false, steps);
        };

        let inner = &current[open + 1..close];
        let replacement = if inner.is_empty() {
            String::new()
        } else {
            reduce(inner, true, None)?.to_string()
        };
        current.replace_range(open..=close, &replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(expr: &str) -> Result<f64, EvalError> {
        resolve(expr, None).map(Number::value)
    }

    #[test]
    fn finds_innermost_group() {
        assert_eq!(innermost_brackets("15+(9*2+(8-4))+5"), Some((8, 12)));
        assert_eq!(innermost_brackets("[1+{2*3}]"), Some((3, 7)));
        assert_eq!(innermost_brackets("1+2"), None);
    }

    #[test]
    fn nested_brackets() {
        assert_eq!(resolved("15+(9*2)"), Ok(33.0));
        assert_eq!(resolved("15+(9*2)+(8-4)"), Ok(37.0));
        assert_eq!(resolved("15+(9*2+(8-4))+5"), Ok(42.0));
        assert_eq!(resolved("{2*[3+(4-1)]}^2"), Ok(144.0));
    }

    #[test]
    fn negative_results_inside_expressions() {
        assert_eq!(resolved("5-(1-2)"), Ok(6.0));
        assert_eq!(resolved("5*(1-2)"), Ok(-5.0));
        assert_eq!(resolved("5+(1-2)"), Ok(4.0));
        assert_eq!(resolved("-(1-2)+3"), Ok(4.0));
        assert_eq!(resolved("(-3)^2"), Ok(9.0));
        assert_eq!(resolved("5*-(-3+1)"), Ok(10.0));
    }

    #[test]
    fn empty_brackets_vanish() {
        assert_eq!(resolved("()5"), Ok(5.0));
        assert_eq!(resolved("()"), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn errors_inside_brackets() {
        assert!(matches!(resolved("5/(4-4)"), Err(EvalError::DivisionByZero { .. })));
        assert!(matches!(resolved("(-8)^0.5"), Err(EvalError::ComplexResult { .. })));
    }

    #[test]
    fn step_trace() {
        let mut steps = Vec::new();
        resolve("15+(9*2+(8-4))+5", Some(&mut steps)).unwrap();
        assert_eq!(
            steps,
            vec!["15+(9*2+(8-4))+5", "15+(9*2+4)+5", "15+22+5", "37+5", "42"]
        );
    }
}
