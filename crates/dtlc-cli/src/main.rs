//! The command-line front end: reads one source file, runs it through the
//! elaborator, and prints either the elaborated definitions or a single
//! `path:line:col: message` diagnostic.

use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "dtlc".to_string());
    let Some(path) = args.next() else {
        eprintln!("usage: {program} FILE");
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    match dtlc::run(&source) {
        Ok(defs) => {
            println!("{}", dtlc::print::display_program(&defs));
            ExitCode::SUCCESS
        }
        Err(err) => {
            let loc = err.loc();
            eprintln!("{path}:{}:{}: {}", loc.line, loc.col, err.message());
            ExitCode::FAILURE
        }
    }
}
