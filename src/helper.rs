/// Parses a comma-separated tag list, dropping empty entries
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Number of whitespace-delimited words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First non-empty line of `content`, cut to `max_chars` characters
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_skips_empty() {
        assert_eq!(
            parse_tags(Some(" work, ,home ,".to_string())),
            vec!["work", "home"]
        );
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one  two\tthree\nfour"), 4);
    }

    #[test]
    fn preview_uses_first_non_empty_line() {
        assert_eq!(content_preview("\n\n  hello world\nsecond", 80), "hello world");
        assert_eq!(content_preview("", 10), "");
    }

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(content_preview("héllo wörld", 4), "héll...");
    }
}
