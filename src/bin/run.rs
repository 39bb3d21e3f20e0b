//! src/bin/run.rs
//! Label a line-oriented step script read from stdin.
//!
//! Each input line is a directive followed by a message:
//!
//! - `<n> <message>` stamps the message at level `n` (clamped);
//! - `. <message>` repeats the previous level;
//! - `+<k> <message>` moves `k` levels deeper before stamping.
//!
//! Anything else is treated as a repeat request carrying the whole line as
//! the message, extending the counter's clamp-don't-reject policy to the
//! command surface. Blank lines are skipped.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use levels::{LevelBounds, LevelRequest, StepTracker};
use levels_sink::LabelSink;

#[derive(Debug, Parser)]
#[command(name = "steplog", about = "Attach level-step labels to a test log script")]
struct Args {
    /// Exclusive lower bound of the valid level range.
    #[arg(long, default_value_t = 0)]
    min_level: u8,

    /// Inclusive upper bound of the valid level range.
    #[arg(long, default_value_t = 5)]
    max_level: u8,
}

pub fn run_with<I, T, R, W>(args: I, input: R, output: &mut W) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match label_script(&args, input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("steplog: {err}");
            ExitCode::from(1)
        }
    }
}

fn label_script<R, W>(args: &Args, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let bounds = LevelBounds::new(args.min_level, args.max_level);
    let mut tracker = StepTracker::new(bounds);
    let mut sink = LabelSink::new(output);

    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let (request, message) = parse_directive(&line);
        sink.emit(&mut tracker, request, message)?;
    }
    sink.flush()
}

/// Splits a script line into its level request and message.
fn parse_directive(line: &str) -> (LevelRequest, &str) {
    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, rest),
        None => (line, ""),
    };

    if head == "." {
        return (LevelRequest::Repeat, rest);
    }
    if let Some(by) = head.strip_prefix('+') {
        if let Ok(by) = by.parse::<i32>() {
            return (LevelRequest::Increment(by), rest);
        }
    } else if let Ok(level) = head.parse::<i32>() {
        return (LevelRequest::Explicit(level), rest);
    }

    // Not a directive: repeat the previous level, keep the whole line.
    (LevelRequest::Repeat, line)
}
