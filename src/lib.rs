//! Dispatch/execute core of a small interactive shell: turns one tokenized
//! command line into processes, wiring them for `&`, `|` and `>>`.

pub mod dispatch;
pub mod fd;
pub mod handlers;
pub mod launcher;
pub mod reaper;
pub mod scanner;
pub mod types;
pub mod words;

#[cfg(test)]
mod tests;

pub use dispatch::{dispatch, process_arglist};
pub use types::{ExecuteResult, Outcome, ShellError};

/// One-time setup before the first dispatch: installs the SIGCHLD reaper and
/// makes the shell ignore SIGINT.
pub fn prepare() -> Result<(), ShellError> {
    reaper::install_signal_policy()
}

/// One-time teardown. Nothing in the core needs releasing.
pub fn finalize() -> Result<(), ShellError> {
    Ok(())
}
