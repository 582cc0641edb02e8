//! Display formatting for backend field names.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Turn a snake_case or kebab-case key into a sentence-case label.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let spaced = key.trim().replace(['_', '-'], " ");
    let words: Vec<&str> = spaced.split_whitespace().collect();
    let joined = words.join(" ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
