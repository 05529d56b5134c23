mod config;
mod output;
mod repl;

use std::io;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{read_expressions, Args, Config, Source};
use output::{calculate_traced, format_json_output, format_text_output};

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Usage errors exit 1 so that 2 always means a failed expression.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_logging(&args.log_filter);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match &config.source {
        Source::Interactive => {
            let mut input = io::stdin().lock();
            let mut out = io::stdout();
            match repl::run(&mut input, &mut out) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Source::Arguments(expressions) => evaluate_all(expressions, &config),
        Source::File(path) => match read_expressions(path) {
            Ok(expressions) => evaluate_all(&expressions, &config),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}

/// Evaluate every expression, printing results in order. Exit code 2 if any failed.
fn evaluate_all(expressions: &[String], config: &Config) -> i32 {
    let mut failed = false;

    if config.steps || config.output_json {
        // Steps and timings are per expression, so these run one at a time.
        for raw in expressions {
            let start_time = Instant::now();
            let outcome = calculate_traced(raw);
            let execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
            failed |= outcome.is_err();

            if config.output_json {
                println!("{}", format_json_output(raw, &outcome, execution_time_ms));
                continue;
            }
            match &outcome {
                Ok(evaluation) => println!("{}", format_text_output(evaluation, config.steps)),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    } else {
        for result in stepcalc::evaluate_batch(expressions, config.jobs) {
            match result {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    failed = true;
                }
            }
        }
    }

    if failed { 2 } else { 0 }
}
