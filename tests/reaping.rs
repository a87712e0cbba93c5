// Runs as its own test binary without the SIGCHLD handler, so the only
// children around are the ones started here.
#![cfg(target_os = "linux")]

use std::time::{Duration, Instant};

use minish::launcher::{launch, Mode};
use minish::reaper::reap_available;
use nix::unistd::Pid;

fn is_zombie(pid: Pid) -> bool {
    std::fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .and_then(|stat| stat.rsplit(')').next().map(|rest| rest.trim_start().starts_with('Z')))
        .unwrap_or(false)
}

#[test]
fn test_reap_collects_every_finished_child() {
    let first = launch(&["true"], Mode::Background, None, None, None).unwrap();
    let second = launch(&["true"], Mode::Background, None, None, None).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !(is_zombie(first) && is_zombie(second)) {
        assert!(Instant::now() < deadline, "children never terminated");
        std::thread::sleep(Duration::from_millis(20));
    }

    assert_eq!(reap_available(), 2);
    assert!(!is_zombie(first) && !is_zombie(second));
    assert_eq!(reap_available(), 0);
}
