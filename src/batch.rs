use std::sync::mpsc;

use threadpool::ThreadPool;
use tracing::debug;

use crate::error::Error;
use crate::types::Number;

/// Run [`crate::calculate`] over independent inputs on a worker pool.
///
/// Results come back in input order. `workers == 0` uses one worker per CPU.
pub fn evaluate_batch<S: AsRef<str>>(inputs: &[S], workers: usize) -> Vec<Result<Number, Error>> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let workers = if workers == 0 { num_cpus::get() } else { workers };
    let workers = workers.min(inputs.len());
    debug!(inputs = inputs.len(), workers, "starting batch evaluation");

    let pool = ThreadPool::new(workers);
    let (tx, rx) = mpsc::channel();
    for (index, input) in inputs.iter().enumerate() {
        let tx = tx.clone();
        let input = input.as_ref().to_string();
        pool.execute(move || {
            // The receiver outlives the pool; a failed send means it is gone.
            let _ = tx.send((index, crate::calculate(&input)));
        });
    }
    drop(tx);

    let mut results: Vec<(usize, Result<Number, Error>)> = rx.iter().collect();
    pool.join();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, ValidationError};

    #[test]
    fn keeps_input_order() {
        let inputs = ["2+3*4", "4(5+2)", "5/(4-4)", "2^3^2"];
        let results = evaluate_batch(&inputs, 2);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0], Ok(Number::new(14.0)));
        assert!(matches!(results[1], Err(Error::Validation(ValidationError::AmbiguousBrackets { .. }))));
        assert!(matches!(results[2], Err(Error::Eval(EvalError::DivisionByZero { .. }))));
        assert_eq!(results[3], Ok(Number::new(512.0)));
    }

    #[test]
    fn empty_batch() {
        let inputs: [&str; 0] = [];
        assert!(evaluate_batch(&inputs, 0).is_empty());
    }
}
