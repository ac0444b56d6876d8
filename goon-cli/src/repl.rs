//! Line-oriented read-eval-print loop
//!
//! Each non-empty line is parsed and evaluated in one shared runtime, so assignments carry
//! over to later lines. Syntax and evaluation errors are printed and the loop goes on; a
//! contract violation ends it.

use crate::{new_session, parse_error};
use anyhow::{Context, Result};
use goon_config::GoonConfig;
use goon_parser::goon::eval::Runtime;
use std::io::{BufRead, Write};

const PROMPT: &str = ">> ";

pub fn run(config: &GoonConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut session = new_session(config);
    let mut runtime = Runtime::new();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("failed to read stdin")? == 0 {
            writeln!(stdout, "quitting...")?;
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match runtime.interpret(&mut session, &line) {
            Ok(value) => writeln!(stdout, "{}", value)?,
            Err(err) => {
                let err = anyhow::Error::from(err);
                if parse_error(&err).is_some_and(|parse| parse.is_fatal()) {
                    return Err(err);
                }
                writeln!(stdout, "error: {}", err)?;
            }
        }
    }
}
