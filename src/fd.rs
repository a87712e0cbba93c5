use std::fmt;
use std::os::unix::io::RawFd;
use std::path::Path;

use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::unistd;

use crate::types::ShellError;

/// Which process a descriptor operation runs on behalf of. Failures in the
/// child are fatal to the child; failures in the parent only abort the
/// current dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Parent,
    Child,
}

impl Side {
    // `context` is only built on failure: a child must not allocate before exec.
    fn settle<T>(
        self,
        result: nix::Result<T>,
        context: impl FnOnce() -> String,
    ) -> Result<T, ShellError> {
        result.map_err(|errno| {
            let err = ShellError::nix(context(), errno);
            if self == Side::Child {
                abort_child(&err, 1);
            }
            err
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Input,
    Output,
}

impl StdStream {
    pub fn raw_fd(self) -> RawFd {
        match self {
            StdStream::Input => libc::STDIN_FILENO,
            StdStream::Output => libc::STDOUT_FILENO,
        }
    }
}

impl fmt::Display for StdStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StdStream::Input => write!(f, "stdin"),
            StdStream::Output => write!(f, "stdout"),
        }
    }
}

/// Both ends of one pipeline's pipe. Owned by a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub read: RawFd,
    pub write: RawFd,
}

/// Opens `path` for appending, creating it owner read/write if missing.
pub fn open_append(path: &Path, side: Side) -> Result<RawFd, ShellError> {
    let flags = OFlag::O_RDWR | OFlag::O_CREAT | OFlag::O_APPEND | OFlag::O_CLOEXEC;
    let result = open(path, flags, Mode::S_IRUSR | Mode::S_IWUSR);
    side.settle(result, || format!("open {}", path.display()))
}

/// Duplicates `source` onto the given standard stream. An absent or negative
/// source leaves the stream alone, and the parent never rewires its own streams.
pub fn redirect(source: Option<RawFd>, target: StdStream, side: Side) -> Result<(), ShellError> {
    let Some(fd) = source.filter(|fd| *fd >= 0) else {
        return Ok(());
    };
    if side == Side::Parent {
        tracing::warn!("refusing to redirect the shell's own {target} to fd {fd}");
        return Ok(());
    }
    let result = unistd::dup2(fd, target.raw_fd()).map(drop);
    side.settle(result, || format!("dup2 fd {fd} onto {target}"))
}

/// Closes `fd` if one was supplied. In the parent a failure is only reported.
pub fn close_safe(fd: Option<RawFd>, side: Side) {
    let Some(fd) = fd.filter(|fd| *fd >= 0) else {
        return;
    };
    if let Err(err) = side.settle(unistd::close(fd), || format!("close fd {fd}")) {
        eprintln!("minish: {err}");
    }
}

/// Creates a close-on-exec pipe for one pipeline dispatch.
pub fn create_pipe() -> Result<Pipe, ShellError> {
    let (read, write) = cloexec_pipe().map_err(|errno| ShellError::nix("pipe", errno))?;
    tracing::debug!(read, write, "created pipe");
    Ok(Pipe { read, write })
}

#[cfg(not(target_vendor = "apple"))]
fn cloexec_pipe() -> nix::Result<(RawFd, RawFd)> {
    unistd::pipe2(OFlag::O_CLOEXEC)
}

#[cfg(target_vendor = "apple")]
fn cloexec_pipe() -> nix::Result<(RawFd, RawFd)> {
    use nix::fcntl::{fcntl, FcntlArg, FdFlag};

    let (read, write) = unistd::pipe()?;
    for fd in [read, write] {
        if let Err(errno) = fcntl(fd, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC)) {
            let _ = unistd::close(read);
            let _ = unistd::close(write);
            return Err(errno);
        }
    }
    Ok((read, write))
}

/// Reports `err` on stderr and terminates the current (forked) process
/// without running any of the parent's exit handlers.
pub(crate) fn abort_child(err: &dyn fmt::Display, code: i32) -> ! {
    // The stderr lock may have been held by another thread at fork time.
    let message = format!("minish: {err}\n");
    let _ = unistd::write(libc::STDERR_FILENO, message.as_bytes());
    unsafe { libc::_exit(code) }
}
