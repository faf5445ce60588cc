use env_logger::{Builder, Env};
use gpde_compute::script::{Session, Value};
use log::info;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};

/// Environment variable controlling the log level.
const GPDE_LOG: &str = "GPDE_LOG";

/// Runs the given input in the session, printing the value of each statement or the error.
///
/// Returns true if the input ran without errors.
fn run(input: &str, session: &mut Session) -> bool {
    match session.run(input) {
        Ok(values) => {
            values.iter()
                .filter(|value| **value != Value::Unit) // declarations print nothing
                .for_each(|value| println!("{}", value));
            true
        },
        Err(err) => {
            err.report_to_stderr("input", input);
            false
        },
    }
}

/// Runs a whole script read from a file or stdin.
fn execute(input: &str) -> ExitCode {
    let mut session = Session::new();
    if run(input, &mut session) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn repl() -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new();

    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&input)?;
        run(&input, &mut session);
    }
}

fn main() -> ExitCode {
    let env = Env::new().filter_or(GPDE_LOG, "warn");
    Builder::from_env(env).try_init().ok();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        info!("running {}", filename);
        match fs::read_to_string(&filename) {
            Ok(input) => execute(&input),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        execute(&input)
    } else {
        // run the repl / interactive mode
        match repl() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            },
        }
    }
}
