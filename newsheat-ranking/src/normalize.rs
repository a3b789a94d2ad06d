//! Title normalization for duplicate detection

/// Normalize a title into its duplicate-comparison key.
///
/// Lowercases, drops every character that is not a letter, digit,
/// underscore or whitespace, collapses whitespace runs to one space and
/// trims. Two titles describe the same story iff their keys are equal.
pub fn normalize_title(title: &str) -> String {
    let stripped: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
