use std::fmt::{Display, Formatter};

use tracing::warn;

use crate::error::ValidationError;
use crate::normalizer::bracketed_negative_at;
use crate::types::{is_closer, is_opener, is_operator};

/// Characters an expression may contain.
pub const VALID_CHARACTERS: &str = "0123456789.()[]{}+-*/^%";

/// A finding that does not reject the expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyBrackets { position: usize },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EmptyBrackets { position } => write!(
                f,
                "empty brackets at position {}, they will be removed from the expression",
                position
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub expression: String,
    pub notices: Vec<Notice>,
}

/// Run every check and return the (possibly rewritten) expression.
///
/// Empty-bracket notices are logged at warn level.
pub fn validate(expr: &str) -> Result<String, ValidationError> {
    let validated = inspect(expr)?;
    for notice in &validated.notices {
        warn!("{}", notice);
    }
    Ok(validated.expression)
}

/// Like [`validate`], handing the non-fatal notices to the caller instead of
/// logging them.
///
/// Checks run in a fixed order and the first failure wins, so a caller always
/// sees exactly one reason. Operator placement is judged as if empty bracket
/// pairs were already gone, because resolution removes them.
pub fn inspect(expr: &str) -> Result<Validated, ValidationError> {
    if expr.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_characters(expr)?;

    // Only ASCII from here on.
    let mut chars: Vec<char> = expr.chars().collect();
    check_leading_trailing(&without_empty_brackets(&chars))?;

    if chars.iter().any(|c| is_opener(*c) || is_closer(*c)) {
        chars = cancel_leading_double_negative(chars);
        check_balance(&chars)?;
        check_ambiguity(&chars)?;
    }
    check_double_operators(&without_empty_brackets(&chars))?;
    check_literal_zero_divisor(&chars)?;
    check_numbers(&chars)?;

    Ok(Validated {
        notices: empty_brackets(&chars),
        expression: chars.into_iter().collect(),
    })
}

fn check_characters(expr: &str) -> Result<(), ValidationError> {
    match expr.chars().enumerate().find(|(_, c)| !VALID_CHARACTERS.contains(*c)) {
        Some((position, ch)) => Err(ValidationError::InvalidCharacter { ch, position }),
        None => Ok(()),
    }
}

/// Characters left once every empty pair, nested ones included, is removed,
/// each with its position in the full expression.
fn without_empty_brackets(chars: &[char]) -> Vec<(usize, char)> {
    let mut kept: Vec<(usize, char)> = Vec::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if is_closer(c) && kept.last().is_some_and(|(_, prev)| is_opener(*prev)) {
            kept.pop();
            continue;
        }
        kept.push((i, c));
    }
    kept
}

fn check_leading_trailing(chars: &[(usize, char)]) -> Result<(), ValidationError> {
    // Nothing but empty brackets; resolution reports that.
    let (Some(&(_, first)), Some(&(_, last))) = (chars.first(), chars.last()) else {
        return Ok(());
    };
    if (is_operator(first) && first != '-') || is_operator(last) {
        return Err(ValidationError::LeadingOrTrailingOperator);
    }
    // The same rule holds at the edges of every bracket group.
    for pair in chars.windows(2) {
        let (a, b) = (pair[0].1, pair[1].1);
        if (is_opener(a) && is_operator(b) && b != '-') || (is_operator(a) && is_closer(b)) {
            return Err(ValidationError::LeadingOrTrailingOperator);
        }
    }
    Ok(())
}

/// `-(-5)...` at the very start becomes `(5)...`.
fn cancel_leading_double_negative(chars: Vec<char>) -> Vec<char> {
    if !bracketed_negative_at(&chars, 0) {
        return chars;
    }
    chars
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != 0 && *i != 2)
        .map(|(_, c)| c)
        .collect()
}

fn check_balance(chars: &[char]) -> Result<(), ValidationError> {
    let mut stack = Vec::new();
    for &c in chars {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Err(ValidationError::UnbalancedBrackets);
                }
            }
            _ => {}
        }
    }
    if stack.is_empty() { Ok(()) } else { Err(ValidationError::UnbalancedBrackets) }
}

/// `4(5+2)`, `(5+2)4` and `(1)(2)` leave the missing operator to guesswork.
fn check_ambiguity(chars: &[char]) -> Result<(), ValidationError> {
    let numeric = |c: char| c.is_ascii_digit() || c == '.';
    for (i, &c) in chars.iter().enumerate() {
        if is_opener(c) && i > 0 && (numeric(chars[i - 1]) || is_closer(chars[i - 1])) {
            return Err(ValidationError::AmbiguousBrackets { position: i });
        }
        if is_closer(c) && chars.get(i + 1).is_some_and(|n| numeric(*n)) {
            return Err(ValidationError::AmbiguousBrackets { position: i });
        }
    }
    Ok(())
}

fn check_double_operators(chars: &[(usize, char)]) -> Result<(), ValidationError> {
    for pair in chars.windows(2) {
        let ((_, a), (position, b)) = (pair[0], pair[1]);
        if is_operator(a) && is_operator(b) && b != '-' {
            return Err(ValidationError::DoubleOperator { position });
        }
    }
    Ok(())
}

/// `/0`, `%0.0`, `/-00`: a divisor written as zero. `/0.5` is fine.
fn check_literal_zero_divisor(chars: &[char]) -> Result<(), ValidationError> {
    for (i, &c) in chars.iter().enumerate() {
        if c != '/' && c != '%' {
            continue;
        }
        let mut start = i + 1;
        if chars.get(start) == Some(&'-') {
            start += 1;
        }
        let literal: Vec<char> = chars[start.min(chars.len())..]
            .iter()
            .copied()
            .take_while(|d| d.is_ascii_digit() || *d == '.')
            .collect();
        let has_digit = literal.iter().any(|d| d.is_ascii_digit());
        if has_digit && literal.iter().all(|d| *d == '0' || *d == '.') {
            return Err(ValidationError::LiteralDivideByZero { position: i });
        }
    }
    Ok(())
}

fn check_numbers(chars: &[char]) -> Result<(), ValidationError> {
    let mut literal = String::new();
    for &c in chars.iter().chain(std::iter::once(&' ')) {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
            continue;
        }
        let dots = literal.matches('.').count();
        if !literal.is_empty() && (dots > 1 || dots == literal.len()) {
            return Err(ValidationError::MalformedNumber { literal });
        }
        literal.clear();
    }
    Ok(())
}

fn empty_brackets(chars: &[char]) -> Vec<Notice> {
    chars
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| is_opener(pair[0]) && is_closer(pair[1]))
        .map(|(position, _)| Notice::EmptyBrackets { position })
        .collect()
}
