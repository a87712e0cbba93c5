use crate::handlers;
use crate::scanner::{self, Operator};
use crate::types::{ExecuteResult, Outcome, ShellError};

/// The single operation that governs one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Background { marker: usize },
    Pipeline { marker: usize },
    AppendRedirect { marker: usize },
    Regular,
}

/// Picks the governing operation. Precedence: `&`, then `|`, then `>>`.
pub fn classify<S: AsRef<str>>(words: &[S]) -> Operation {
    if let Some(marker) = scanner::find(words, Operator::Background) {
        Operation::Background { marker }
    } else if let Some(marker) = scanner::find(words, Operator::Pipe) {
        Operation::Pipeline { marker }
    } else if let Some(marker) = scanner::find(words, Operator::AppendRedirect) {
        Operation::AppendRedirect { marker }
    } else {
        Operation::Regular
    }
}

/// Runs one tokenized command line and returns once every foreground process
/// it started has terminated.
pub fn dispatch<S: AsRef<str>>(words: &[S]) -> ExecuteResult {
    if words.is_empty() {
        return Err(ShellError::InvalidSyntax("empty command line".to_string()));
    }

    let operation = classify(words);
    tracing::debug!(?operation, "dispatching");

    match operation {
        Operation::Background { marker } => handlers::run_background(words, marker),
        Operation::Pipeline { marker } => handlers::run_pipeline(words, marker),
        Operation::AppendRedirect { marker } => handlers::run_append(words, marker),
        Operation::Regular => handlers::run_regular(words),
    }
}

/// Dispatches `words`, reporting any failure on stderr. Always asks the
/// read-loop to continue.
pub fn process_arglist<S: AsRef<str>>(words: &[S]) -> bool {
    match dispatch(words) {
        Ok(Outcome::Finished(code)) => tracing::debug!(?code, "command finished"),
        Ok(Outcome::Background(pid)) => tracing::debug!(%pid, "running in background"),
        Err(err) => eprintln!("minish: {err}"),
    }
    true
}
