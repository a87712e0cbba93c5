use std::ffi::CString;
use std::os::unix::io::RawFd;

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::unistd::{execvp, fork, ForkResult, Pid};

use crate::fd::{self, Pipe, Side, StdStream};
use crate::types::ShellError;

/// Decides the interrupt policy of a freshly created process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Interruptible from the terminal; the caller waits for it.
    Foreground,
    /// Ignores interrupts; collected later by the reaper.
    Background,
}

/// Forks a child that runs `argv` with its standard streams wired to `output`
/// and `input`, and returns the child's pid without waiting for it.
///
/// When `pipe` is given, the child closes both of its original ends once the
/// streams are duplicated; otherwise it closes `output` and `input` themselves.
pub fn launch<S: AsRef<str>>(
    argv: &[S],
    mode: Mode,
    output: Option<RawFd>,
    input: Option<RawFd>,
    pipe: Option<Pipe>,
) -> Result<Pid, ShellError> {
    if argv.is_empty() {
        return Err(ShellError::InvalidSyntax("missing command".to_string()));
    }
    // Between fork and exec the child only allocates on its way to `_exit`.
    let args = to_cstrings(argv)?;

    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            tracing::debug!(pid = %child, ?mode, program = argv[0].as_ref(), "launched");
            Ok(child)
        }
        Ok(ForkResult::Child) => exec_child(&args, mode, output, input, pipe),
        Err(errno) => Err(ShellError::nix("fork", errno)),
    }
}

fn to_cstrings<S: AsRef<str>>(argv: &[S]) -> Result<Vec<CString>, ShellError> {
    argv.iter()
        .map(|word| {
            let word: &str = word.as_ref();
            CString::new(word)
                .map_err(|_| ShellError::InvalidArgument(format!("{word:?} contains a NUL byte")))
        })
        .collect()
}

fn exec_child(
    args: &[CString],
    mode: Mode,
    output: Option<RawFd>,
    input: Option<RawFd>,
    pipe: Option<Pipe>,
) -> ! {
    if let Err(err) = wire_child(mode, output, input, pipe) {
        fd::abort_child(&err, 1);
    }

    let program = &args[0];
    match execvp(program, args) {
        Ok(never) => match never {},
        Err(Errno::ENOENT) => {
            let name = program.to_string_lossy();
            fd::abort_child(&format_args!("{name}: command not found"), 127)
        }
        Err(errno) => {
            let name = program.to_string_lossy();
            fd::abort_child(&format_args!("{name}: {errno}"), 126)
        }
    }
}

fn wire_child(
    mode: Mode,
    output: Option<RawFd>,
    input: Option<RawFd>,
    pipe: Option<Pipe>,
) -> Result<(), ShellError> {
    fd::redirect(output, StdStream::Output, Side::Child)?;
    fd::redirect(input, StdStream::Input, Side::Child)?;

    match pipe {
        Some(pipe) => {
            fd::close_safe(Some(pipe.read), Side::Child);
            fd::close_safe(Some(pipe.write), Side::Child);
        }
        None => {
            fd::close_safe(output, Side::Child);
            fd::close_safe(input, Side::Child);
        }
    }

    let interrupt = match mode {
        Mode::Foreground => SigHandler::SigDfl,
        Mode::Background => SigHandler::SigIgn,
    };
    unsafe { signal(Signal::SIGINT, interrupt) }
        .map_err(|errno| ShellError::nix("set SIGINT disposition", errno))?;

    // The Rust runtime ignores SIGPIPE and an ignored disposition survives exec.
    unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }
        .map(drop)
        .map_err(|errno| ShellError::nix("set SIGPIPE disposition", errno))
}
