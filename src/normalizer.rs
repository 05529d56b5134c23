use crate::types::{is_closer, is_opener, is_operator};

/// Strip whitespace and fold redundant sign sequences until nothing changes.
///
/// Total and pure: any input yields a string, and normalizing the result
/// again returns it unchanged.
///
/// ```
/// assert_eq!(stepcalc::normalize(" 5 - - 3 "), "5+3");
/// assert_eq!(stepcalc::normalize("+4*-(-2)"), "4*(2)");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut expr: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    loop {
        let next = cancel_bracket_negatives(&expr);
        let next = collapse_signs(&next);
        let mut next = collapse_carets(&next);
        if next.starts_with('+') {
            next.remove(0);
        }
        if next == expr {
            return next;
        }
        expr = next;
    }
}

/// `*-(-5)` → `*(5)`, likewise after `/`, `+` and `-`.
fn cancel_bracket_negatives(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], '*' | '/' | '+' | '-') && bracketed_negative_at(&chars, i + 1) {
            out.push(chars[i]);
            out.push(chars[i + 2]);
            i += 4;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// True when `-(-X)` starts at `start` and X is a single unsigned number.
/// Only then do the two minus signs cancel without changing the value.
pub(crate) fn bracketed_negative_at(chars: &[char], start: usize) -> bool {
    let Some(rest) = chars.get(start..) else {
        return false;
    };
    if rest.len() < 5 || rest[0] != '-' || !is_opener(rest[1]) || rest[2] != '-' {
        return false;
    }
    let digits = rest[3..]
        .iter()
        .take_while(|c| c.is_ascii_digit() || **c == '.')
        .count();
    digits > 0 && rest.get(3 + digits).is_some_and(|c| is_closer(*c))
}

/// Every run of two or more `+`/`-` becomes one sign by parity of its minuses.
pub(crate) fn collapse_signs(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '+' && c != '-' {
            out.push(c);
            continue;
        }
        let mut minuses = usize::from(c == '-');
        while let Some(&next) = chars.peek() {
            if next != '+' && next != '-' {
                break;
            }
            minuses += usize::from(next == '-');
            chars.next();
        }
        out.push(if minuses % 2 == 1 { '-' } else { '+' });
    }
    out
}

fn collapse_carets(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    for c in expr.chars() {
        if c == '^' && out.ends_with('^') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Drop a `+` at the start, after another operator, or after an opener.
/// Only the evaluator does this; validation still sees `5*+3`.
pub(crate) fn strip_unary_plus(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    for c in expr.chars() {
        if c == '+' && out.chars().next_back().map_or(true, |p| is_operator(p) || is_opener(p)) {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace() {
        assert_eq!(normalize("15+(9 *2)"), "15+(9*2)");
        assert_eq!(normalize(" 1\t+ 2 \n"), "1+2");
    }

    #[test]
    fn sign_pairs() {
        assert_eq!(normalize("5--3"), "5+3");
        assert_eq!(normalize("5+-3"), "5-3");
        assert_eq!(normalize("5-+3"), "5-3");
        assert_eq!(normalize("5++3"), "5+3");
        assert_eq!(normalize("2^^3"), "2^3");
    }

    #[test]
    fn longer_runs_reduce_by_parity() {
        assert_eq!(normalize("5---3"), "5-3");
        assert_eq!(normalize("5----3"), "5+3");
        assert_eq!(normalize("5-----3"), "5-3");
        assert_eq!(normalize("5+-+-+-3"), "5-3");
    }

    #[test]
    fn leading_plus_removed() {
        assert_eq!(normalize("+5*2"), "5*2");
        assert_eq!(normalize("++5"), "5");
        assert_eq!(normalize("--5"), "5");
        assert_eq!(normalize("---5"), "-5");
    }

    #[test]
    fn inner_plus_is_left_for_the_validator() {
        assert_eq!(normalize("5*+3"), "5*+3");
        assert_eq!(normalize("5*--3"), "5*+3");
        assert_eq!(normalize("(+3)*2"), "(+3)*2");
        assert_eq!(normalize("2^--(3)"), "2^+(3)");
        assert_eq!(strip_unary_plus("5*+3"), "5*3");
    }

    #[test]
    fn bracketed_double_negatives() {
        assert_eq!(normalize("4*-(-5)"), "4*(5)");
        assert_eq!(normalize("4/-(-5)"), "4/(5)");
        assert_eq!(normalize("4+-(-5)"), "4+(5)");
        assert_eq!(normalize("4--(-5)"), "4-(5)");
        assert_eq!(normalize("4*-[-2.5]"), "4*[2.5]");
    }

    #[test]
    fn bracketed_sums_keep_their_signs() {
        // -(-3+1) is 2, not 4: the minus signs must not cancel here.
        assert_eq!(normalize("5*-(-3+1)"), "5*-(-3+1)");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        for raw in ["5 - - - 3", "+(+4)*-(-2)", "2^^^3--1", "--(-5)", "a b c"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
