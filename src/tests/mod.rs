mod scanner_tests;

use std::path::Path;
use std::sync::Once;
use std::time::{Duration, Instant};

static PREPARE: Once = Once::new();

/// Installs the shell's signal policy once for the whole test binary.
fn prepared() {
    PREPARE.call_once(|| crate::prepare().expect("signal policy"));
}

/// Polls until `path` holds non-empty contents or `timeout` passes.
fn read_eventually(path: &Path, timeout: Duration) -> String {
    let deadline = Instant::now() + timeout;
    loop {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if !content.is_empty() || Instant::now() >= deadline {
            return content;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}
