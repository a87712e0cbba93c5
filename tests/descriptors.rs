// Runs as its own test binary so no other test thread opens descriptors
// while the count is taken.
#![cfg(target_os = "linux")]

use std::path::Path;

use tempfile::TempDir;

fn open_descriptors() -> usize {
    std::fs::read_dir("/proc/self/fd").map(|entries| entries.count()).unwrap_or(0)
}

fn run_all(dir: &Path) {
    let out = dir.join("out.txt");
    let out = out.to_str().unwrap();
    let missing = dir.join("missing").join("out.txt");
    let missing = missing.to_str().unwrap();

    assert!(minish::process_arglist(&["true"]));
    assert!(minish::process_arglist(&["echo", "hi", ">>", out]));
    assert!(minish::process_arglist(&["echo", "hi", ">>", missing]));
    assert!(minish::process_arglist(&["echo", "hi", "|", "cat"]));
    assert!(minish::process_arglist(&["echo", "hi", "|", "minish-no-such-program-xyz"]));
    assert!(minish::process_arglist(&["minish-no-such-program-xyz", "|", "cat"]));
    assert!(minish::process_arglist(&["|", "cat"]));
    assert!(minish::process_arglist(&["sleep", "0", "&"]));
}

#[test]
fn test_no_descriptor_survives_a_dispatch() {
    minish::prepare().unwrap();
    let dir = TempDir::new().unwrap();

    let before = open_descriptors();
    run_all(dir.path());
    let after = open_descriptors();

    assert_eq!(before, after);
}
