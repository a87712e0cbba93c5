use std::fmt;

/// Control tokens recognized in a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Background,     // &
    Pipe,           // |
    AppendRedirect, // >>
}

impl Operator {
    pub const fn token(self) -> &'static str {
        match self {
            Operator::Background => "&",
            Operator::Pipe => "|",
            Operator::AppendRedirect => ">>",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returns the index at which `op` governs `words`, if it does.
///
/// `&` only counts as the last word and `>>` only as the second-to-last, and
/// both need at least two words. `|` matches at its first occurrence.
pub fn find<S: AsRef<str>>(words: &[S], op: Operator) -> Option<usize> {
    let is_op = |index: usize| words.get(index).is_some_and(|word| word.as_ref() == op.token());

    match op {
        Operator::Background if words.len() >= 2 => Some(words.len() - 1).filter(|&i| is_op(i)),
        Operator::AppendRedirect if words.len() >= 2 => Some(words.len() - 2).filter(|&i| is_op(i)),
        Operator::Background | Operator::AppendRedirect => None,
        Operator::Pipe => words.iter().position(|word| word.as_ref() == op.token()),
    }
}
