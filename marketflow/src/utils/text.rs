//! Text helpers shared by the scraper, the prompts and the report.

/// Cuts `text` to at most `max_chars` characters, appending `suffix` when cut.
///
/// Counts characters, not bytes, so multi-byte text is never split.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize, suffix: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{suffix}", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// The first `max_chars` characters of `text`.
#[must_use]
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Renders `items` as a `- ` bullet list, one per line.
#[must_use]
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_short_input_is_unchanged() {
        assert_eq!(truncate_text("hello", 10, "..."), "hello");
        assert_eq!(truncate_text("hello", 5, "..."), "hello");
    }

    #[test]
    fn test_truncate_text_appends_suffix() {
        assert_eq!(truncate_text("hello world", 5, "..."), "hello...");
    }

    #[test]
    fn test_truncate_text_respects_char_boundaries() {
        assert_eq!(truncate_text("héllo wörld", 7, "…"), "héllo w…");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("abcdef", 3), "abc");
        assert_eq!(take_chars("ab", 3), "ab");
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(&["a", "b"]), "- a\n- b");
        assert_eq!(bullet_list::<&str>(&[]), "");
    }
}
