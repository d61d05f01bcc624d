//! UI helper functions

/// Simple text wrapping helper.
///
/// Widths are counted in chars so bullets containing `×` or `—` wrap at the
/// same column as plain ASCII. Words longer than `max_width` are split into
/// `max_width`-char chunks so no row is wider than `max_width`.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_width {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current_line = piece;
                }
            }
        } else if current_line.is_empty() {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Truncate to `max_width` chars, marking the cut with "..."
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let take_chars = max_width.saturating_sub(3);
    let truncated: String = text.chars().take(take_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_empty() {
        let result = wrap_text("", 10);
        assert_eq!(result, vec![""]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        let result = wrap_text("hello world", 0);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_multiple_lines() {
        let result = wrap_text("hello world foo bar", 10);
        assert_eq!(result, vec!["hello", "world foo", "bar"]);
    }

    #[test]
    fn test_wrap_text_splits_long_word() {
        let result = wrap_text("see https://example.com/a/b ok", 8);
        assert_eq!(result, vec!["see", "https://", "example.", "com/a/b", "ok"]);
        for row in &result {
            assert!(row.chars().count() <= 8);
        }
    }

    #[test]
    fn test_wrap_text_long_word_tail_joins_next_word() {
        let result = wrap_text("abcdefg hi", 5);
        assert_eq!(result, vec!["abcde", "fg hi"]);
    }

    #[test]
    fn test_wrap_text_counts_chars_not_bytes() {
        // "× ×" is 3 chars but 5 bytes
        let result = wrap_text("× × ab", 5);
        assert_eq!(result, vec!["× ×", "ab"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Healthcare App Development", 10), "Healthc...");
    }
}
