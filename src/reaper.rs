//! Collection of terminated children, both asynchronously from the SIGCHLD
//! handler and synchronously for foreground processes.
//!
//! Both paths share `waitpid`, so either may collect a process the other was
//! after. An explicit wait that finds its target already gone treats that as
//! success.

use nix::errno::Errno;
use nix::sys::signal::{sigaction, signal, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{self, Pid};

use crate::types::ShellError;

const REAP_FAILED: &[u8] = b"minish: failed to reap background process\n";

/// Installs the process-wide signal policy: SIGCHLD runs the reaper (with
/// interrupted system calls restarted) and SIGINT is ignored by the shell.
pub fn install_signal_policy() -> Result<(), ShellError> {
    let reap = SigAction::new(
        SigHandler::Handler(on_child_exit),
        SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGCHLD, &reap) }
        .map_err(|errno| ShellError::nix("install SIGCHLD handler", errno))?;
    unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }
        .map_err(|errno| ShellError::nix("ignore SIGINT", errno))?;

    tracing::debug!("signal policy installed");
    Ok(())
}

extern "C" fn on_child_exit(_signal: libc::c_int) {
    let saved = errno::get();
    reap_available();
    errno::set(saved);
}

/// Collects every child that has already terminated, without blocking, and
/// returns how many were collected.
///
/// Safe to call from a signal handler: no allocation, no locks, and errors are
/// reported with a single `write(2)`.
pub fn reap_available() -> usize {
    let mut reaped = 0;
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(_) => reaped += 1,
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => break,
            Err(_) => {
                let _ = unistd::write(libc::STDERR_FILENO, REAP_FAILED);
                break;
            }
        }
    }
    reaped
}

/// Blocks until `pid` terminates and returns its exit code.
///
/// Interrupted waits are retried. `None` means the reaper got there first.
pub fn wait_for(pid: Pid) -> Result<Option<i32>, ShellError> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                tracing::debug!(%pid, code, "foreground process exited");
                return Ok(Some(code));
            }
            Ok(WaitStatus::Signaled(_, sig, _)) => {
                tracing::debug!(%pid, ?sig, "foreground process killed");
                return Ok(Some(128 + sig as i32));
            }
            Ok(status) => {
                tracing::debug!(%pid, ?status, "unexpected wait status");
                return Ok(None);
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => {
                tracing::debug!(%pid, "already collected by the reaper");
                return Ok(None);
            }
            Err(errno) => return Err(ShellError::nix(format!("waitpid {pid}"), errno)),
        }
    }
}

// The handler must leave errno as it found it: the code it preempted may be
// between a failed system call and reading errno.
mod errno {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    unsafe fn location() -> *mut libc::c_int {
        libc::__errno_location()
    }

    #[cfg(target_vendor = "apple")]
    unsafe fn location() -> *mut libc::c_int {
        libc::__error()
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    pub(super) fn get() -> libc::c_int {
        unsafe { *location() }
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    pub(super) fn set(value: libc::c_int) {
        unsafe { *location() = value }
    }

    #[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
    pub(super) fn get() -> libc::c_int {
        0
    }

    #[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
    pub(super) fn set(_value: libc::c_int) {}
}
