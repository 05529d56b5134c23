use serde::Serialize;
use stepcalc::{Error, Evaluation, Number};

#[derive(Debug, Serialize)]
struct ErrorReport {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    expression: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

/// Full pipeline with the intermediate states kept.
pub fn calculate_traced(raw: &str) -> Result<Evaluation, Error> {
    let expression = stepcalc::validate_and_normalize(raw)?;
    Ok(stepcalc::evaluate_traced(&expression)?)
}

pub fn format_json_output(raw: &str, outcome: &Result<Evaluation, Error>, execution_time_ms: f64) -> String {
    let report = match outcome {
        Ok(evaluation) => Report {
            expression: raw,
            result: Some(evaluation.value),
            steps: Some(evaluation.steps.as_slice()),
            execution_time: Some(format!("{:.2} ms", execution_time_ms)),
            error: None,
        },
        Err(e) => Report {
            expression: raw,
            result: None,
            steps: None,
            execution_time: None,
            error: Some(ErrorReport { kind: e.kind(), message: e.to_string() }),
        },
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

/// Lines for stdout: the steps (when asked for) followed by the result.
pub fn format_text_output(evaluation: &Evaluation, steps: bool) -> String {
    let mut lines: Vec<String> = if steps { evaluation.steps.clone() } else { Vec::new() };
    // The last step already shows the result.
    if lines.last().map(String::as_str) != Some(evaluation.value.to_string().as_str()) {
        lines.push(evaluation.value.to_string());
    }
    lines.join("\n")
}
