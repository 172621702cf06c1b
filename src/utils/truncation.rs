const MAX_LOG_LENGTH: usize = 500;
const MAX_ERROR_LENGTH: usize = 2_000;

fn truncate_chars(text: &str, max_chars: usize) -> Option<(&str, usize)> {
    let (cut, _) = text.char_indices().nth(max_chars)?;
    Some((&text[..cut], text[cut..].chars().count()))
}

/// Shorten model output before it goes into a log line.
pub fn truncate_for_log(output: &str) -> String {
    match truncate_chars(output, MAX_LOG_LENGTH) {
        Some((head, rest)) => format!("{}... [truncated {} chars]", head, rest),
        None => output.to_string(),
    }
}

pub fn truncate_error(error: &str) -> String {
    match truncate_chars(error, MAX_ERROR_LENGTH) {
        Some((head, _)) => format!("{}...", head),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_for_log("Golpe do Pix"), "Golpe do Pix");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let text = "ã".repeat(MAX_LOG_LENGTH + 10);
        let truncated = truncate_for_log(&text);
        assert!(truncated.starts_with(&"ã".repeat(MAX_LOG_LENGTH)));
        assert!(truncated.ends_with("[truncated 10 chars]"));
    }

    #[test]
    fn test_truncate_error() {
        let text = "x".repeat(MAX_ERROR_LENGTH + 1);
        assert_eq!(truncate_error(&text).len(), MAX_ERROR_LENGTH + 3);
    }
}
