/// Splits a raw input line into words on spaces and tabs.
///
/// No quoting or escaping: control tokens must stand alone as words.
pub fn split_words(input: &str) -> Vec<String> {
    input
        .split([' ', '\t', '\n', '\r'])
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
