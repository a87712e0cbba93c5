use std::path::Path;

use crate::fd::{self, Pipe, Side};
use crate::launcher::{launch, Mode};
use crate::reaper::wait_for;
use crate::scanner::Operator;
use crate::types::{ExecuteResult, Outcome, ShellError};

pub fn run_regular<S: AsRef<str>>(words: &[S]) -> ExecuteResult {
    let pid = launch(words, Mode::Foreground, None, None, None)?;
    Ok(Outcome::Finished(wait_for(pid)?))
}

/// Starts `words[..marker]` with interrupts ignored and returns immediately.
pub fn run_background<S: AsRef<str>>(words: &[S], marker: usize) -> ExecuteResult {
    let pid = launch(&words[..marker], Mode::Background, None, None, None)?;
    Ok(Outcome::Background(pid))
}

/// Runs `words[..marker]` with stdout appended to the file named after the marker.
pub fn run_append<S: AsRef<str>>(words: &[S], marker: usize) -> ExecuteResult {
    let argv = &words[..marker];
    if argv.is_empty() {
        return Err(missing_command(Operator::AppendRedirect));
    }
    let target: &str = words[marker + 1].as_ref();

    let file = fd::open_append(Path::new(target), Side::Parent)?;
    let status = launch(argv, Mode::Foreground, Some(file), None, None).and_then(wait_for);
    fd::close_safe(Some(file), Side::Parent);

    Ok(Outcome::Finished(status?))
}

/// Runs both sides of `words` split at `marker`, the first stage's stdout
/// feeding the second stage's stdin, and waits for both.
pub fn run_pipeline<S: AsRef<str>>(words: &[S], marker: usize) -> ExecuteResult {
    let (writer, reader) = (&words[..marker], &words[marker + 1..]);
    if writer.is_empty() || reader.is_empty() {
        return Err(missing_command(Operator::Pipe));
    }

    let pipe = fd::create_pipe()?;
    let first = match launch(writer, Mode::Foreground, Some(pipe.write), None, Some(pipe)) {
        Ok(pid) => pid,
        Err(err) => {
            close_pipe(pipe);
            return Err(err);
        }
    };
    let second = launch(reader, Mode::Foreground, None, Some(pipe.read), Some(pipe));

    // The reader only sees end-of-file once the parent's write end is gone.
    close_pipe(pipe);

    let first_status = wait_for(first);
    let second_status = wait_for(second?);
    first_status?;

    Ok(Outcome::Finished(second_status?))
}

fn close_pipe(pipe: Pipe) {
    fd::close_safe(Some(pipe.read), Side::Parent);
    fd::close_safe(Some(pipe.write), Side::Parent);
}

fn missing_command(op: Operator) -> ShellError {
    ShellError::InvalidSyntax(format!("missing command around `{op}`"))
}
