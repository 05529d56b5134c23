use std::io::{self, BufRead, Write};

use stepcalc::validator;

const GREETING: &str = "Please enter your expression (use '%' for MOD and '^' for exponents): ";
const ANOTHER_PROMPT: &str = "do another calculation? [Y/n] ";

/// Prompt, evaluate and repeat until the user says no or input ends.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    loop {
        let Some(expression) = read_expression(input, out)? else {
            return Ok(());
        };

        match stepcalc::evaluate_traced(&expression) {
            Ok(evaluation) => {
                for step in &evaluation.steps {
                    writeln!(out, "{}", step)?;
                }
                writeln!(out, "Final answer: {}", evaluation.value)?;
            }
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                writeln!(out, "Calculation could not be completed due to previous error(s).")?;
            }
        }

        if !ask_another(input, out)? {
            return Ok(());
        }
    }
}

/// Keep asking until a valid expression arrives. `None` on end of input.
fn read_expression<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<String>> {
    loop {
        write!(out, "{}", GREETING)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match validator::inspect(&stepcalc::normalize(&line)) {
            Ok(validated) => {
                for notice in &validated.notices {
                    writeln!(out, "{}", notice)?;
                }
                return Ok(Some(validated.expression));
            }
            Err(e) => writeln!(out, "invalid input, {}", e)?,
        }
    }
}

/// Empty answer means yes; anything but y/n is asked again.
fn ask_another<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    loop {
        write!(out, "{}", ANOTHER_PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_lowercase().as_str() {
            "" | "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(out, "ERROR: invalid input. Please enter 'y' or 'n' ")?,
        }
    }
}
