use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("give expressions or --file, not both")]
    ConflictingSources,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "sc",
    version,
    about = "Evaluate arithmetic expressions one operator at a time",
    after_help = "Examples:\n  sc \"15+(9*2+(8-4))+5\"\n  sc \"2^3^2\" --steps\n  sc \"5/(4-4)\" --output-json\n  sc -- \"-5+3\"\n  sc --file problems.txt --jobs 4\n  sc                      # interactive"
)]
pub struct Args {
    /// Expressions to evaluate; interactive mode when none is given.
    /// Put `--` before an expression that starts with `-`.
    pub expressions: Vec<String>,

    /// Print every intermediate expression before the result
    #[arg(long)]
    pub steps: bool,

    /// Print one JSON object per expression with result, steps and timing
    #[arg(long = "output-json")]
    pub output_json: bool,

    /// Read expressions from a file, one per line
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Worker threads for evaluating many expressions (0 = one per CPU)
    #[arg(short, long, env = "STEPCALC_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Log filter, e.g. "warn" or "stepcalc=debug"
    #[arg(long = "log", env = "STEPCALC_LOG", default_value = "warn")]
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Arguments(Vec<String>),
    File(PathBuf),
    Interactive,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub steps: bool,
    pub output_json: bool,
    pub jobs: usize,
    pub log_filter: String,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let source = match (args.expressions.is_empty(), args.file) {
            (false, Some(_)) => return Err(ConfigError::ConflictingSources),
            (true, Some(path)) => Source::File(path),
            (false, None) => Source::Arguments(args.expressions),
            (true, None) => Source::Interactive,
        };
        Ok(Self {
            source,
            steps: args.steps,
            output_json: args.output_json,
            jobs: args.jobs,
            log_filter: args.log_filter,
        })
    }
}

/// Non-blank lines of an expression file.
pub fn read_expressions(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Config {
        Config::from_args(Args::parse_from(argv)).expect("valid config")
    }

    #[test]
    fn sources() {
        assert_eq!(parse(&["sc"]).source, Source::Interactive);
        assert_eq!(
            parse(&["sc", "--", "-5+3", "2*2"]).source,
            Source::Arguments(vec!["-5+3".to_string(), "2*2".to_string()])
        );
        assert_eq!(parse(&["sc", "--file", "x.txt"]).source, Source::File(PathBuf::from("x.txt")));
    }

    #[test]
    fn flags() {
        let config = parse(&["sc", "1+1", "--steps", "--output-json", "--jobs", "3"]);
        assert!(config.steps);
        assert!(config.output_json);
        assert_eq!(config.jobs, 3);
    }

    #[test]
    fn expressions_and_file_conflict() {
        let args = Args::parse_from(["sc", "1+1", "--file", "x.txt"]);
        assert!(matches!(Config::from_args(args), Err(ConfigError::ConflictingSources)));
    }

    #[test]
    fn reads_non_blank_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "1+1\n\n  2*3  \n").unwrap();
        let exprs = read_expressions(file.path()).unwrap();
        assert_eq!(exprs, vec!["1+1", "2*3"]);
    }
}
