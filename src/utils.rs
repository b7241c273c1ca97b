//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one CJK unified ideograph
/// (U+4E00..U+9FFF).
///
/// Returns false for empty strings, Latin-only text, or pure symbols.
///
/// # Examples
///
/// ```
/// use hanex::utils::contains_chinese;
///
/// assert!(contains_chinese("你好"));
/// assert!(contains_chinese("hello 世界"));
/// assert!(contains_chinese("确认?"));
/// assert!(!contains_chinese("hello"));
/// assert!(!contains_chinese("123"));
/// assert!(!contains_chinese(""));
/// ```
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_contains_chinese() {
        // Should return true for text with CJK ideographs
        assert!(contains_chinese("你好"));
        assert!(contains_chinese("确认删除"));
        assert!(contains_chinese("hello 世界"));
        assert!(contains_chinese("  中  "));
        assert!(contains_chinese("值: 中文"));

        // Should return false for text without CJK ideographs
        assert!(!contains_chinese("hello"));
        assert!(!contains_chinese("123"));
        assert!(!contains_chinese("---"));
        assert!(!contains_chinese("$100"));
        assert!(!contains_chinese("   "));
        assert!(!contains_chinese(""));
        // Hiragana and Hangul are outside the unified-ideograph block
        assert!(!contains_chinese("こんにちは"));
        assert!(!contains_chinese("안녕하세요"));
    }

    #[test]
    fn test_block_boundaries() {
        assert!(contains_chinese("\u{4e00}"));
        assert!(contains_chinese("\u{9fff}"));
        assert!(!contains_chinese("\u{4dff}"));
        assert!(!contains_chinese("\u{a000}"));
    }
}
