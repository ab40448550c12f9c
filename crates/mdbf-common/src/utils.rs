//! Shared utility functions.

/// Maximum length of a single Discord message.
pub const MESSAGE_LIMIT: usize = 2000;

/// Truncates a string to a maximum length in characters, with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Joins display names into a comma separated list.
pub fn join_names<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        let truncated = truncate_string(input, 20);
        assert_eq!(truncated, "This is a very lo...");

        let short = "Short";
        let not_truncated = truncate_string(short, 20);
        assert_eq!(not_truncated, "Short");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let truncated = truncate_string("ééééééééé", 5);
        assert_eq!(truncated, "éé...");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(["filter", "greeter"]), "filter, greeter");
        assert_eq!(join_names(Vec::<String>::new()), "");
    }
}
