use crate::dispatch::{classify, Operation};
use crate::scanner::{find, Operator};

#[test]
fn test_background_marker_must_be_last() {
    assert_eq!(find(&["sleep", "5", "&"], Operator::Background), Some(2));
    assert_eq!(find(&["echo", "&", "x"], Operator::Background), None);
    assert_eq!(find(&["sleep", "5"], Operator::Background), None);
}

#[test]
fn test_background_marker_needs_two_words() {
    assert_eq!(find(&["&"], Operator::Background), None);
    assert_eq!(find(&["x", "&"], Operator::Background), Some(1));
}

#[test]
fn test_append_marker_must_be_second_to_last() {
    assert_eq!(find(&["echo", "hi", ">>", "out.txt"], Operator::AppendRedirect), Some(2));
    assert_eq!(find(&["echo", ">>", "a", "b"], Operator::AppendRedirect), None);
    assert_eq!(find(&["echo", "hi", ">>"], Operator::AppendRedirect), None);
    assert_eq!(find(&[">>", "out.txt"], Operator::AppendRedirect), Some(0));
    assert_eq!(find(&[">>"], Operator::AppendRedirect), None);
}

#[test]
fn test_pipe_marker_first_occurrence() {
    assert_eq!(find(&["ls", "|", "wc", "-l"], Operator::Pipe), Some(1));
    assert_eq!(find(&["a", "|", "b", "|", "c"], Operator::Pipe), Some(1));
    assert_eq!(find(&["|"], Operator::Pipe), Some(0));
    assert_eq!(find(&["ls", "-l"], Operator::Pipe), None);
}

#[test]
fn test_classify_precedence() {
    assert_eq!(classify(&["ls", "-l"]), Operation::Regular);
    assert_eq!(classify(&["a", "|", "b", "&"]), Operation::Background { marker: 3 });
    assert_eq!(classify(&["a", "|", "b", ">>", "f"]), Operation::Pipeline { marker: 1 });
    assert_eq!(classify(&["a", ">>", "&"]), Operation::Background { marker: 2 });
    assert_eq!(classify(&["echo", "hi", ">>", "f"]), Operation::AppendRedirect { marker: 2 });
}

#[test]
fn test_plain_arguments_are_not_operators() {
    assert_eq!(classify(&["echo", "&", "done"]), Operation::Regular);
    assert_eq!(classify(&["echo", ">>", "a", "b"]), Operation::Regular);
    assert_eq!(classify(&["&"]), Operation::Regular);
}
