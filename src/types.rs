use nix::errno::Errno;
use nix::unistd::Pid;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("System error ({context}): {source}")]
    NixError {
        context: String,
        #[source]
        source: Errno,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}

impl ShellError {
    pub(crate) fn nix(context: impl Into<String>, source: Errno) -> Self {
        ShellError::NixError {
            context: context.into(),
            source,
        }
    }
}

/// What a dispatch left behind once it returned control to the read-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every foreground process terminated. Carries the exit code of the last
    /// one (128 + signal number if it was killed), or `None` when the SIGCHLD
    /// reaper collected it first. With the reaper installed, `None` is the
    /// usual result for short-lived commands.
    Finished(Option<i32>),
    /// A process was started in the background and left to the reaper.
    Background(Pid),
}

pub type ExecuteResult = Result<Outcome, ShellError>;
