#![deny(unsafe_code)]

#[path = "run.rs"]
mod run;

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    run::run_with(env::args_os(), stdin, &mut stdout)
}
