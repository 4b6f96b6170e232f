//! Document key sanitization.
//!
//! The registry never rewrites a slug. It only compares each path segment
//! with its sanitized form and rejects segments that would change.

/// Maximum key length (in characters) kept by sanitization.
pub const MAX_KEY_LEN: usize = 255;

/// Canonical naming-safe transformation for path segments.
pub trait KeySanitizer: Send + Sync {
    fn sanitize_key(&self, key: &str) -> String;
}

/// Sanitization rules for keys in the document namespace.
///
/// - surrounding ASCII whitespace is trimmed
/// - supplementary-plane (4-byte) characters become `-`
/// - `/` and URL-reserved characters become `-`
/// - the result is cut to [`MAX_KEY_LEN`] characters
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentKeys;

impl KeySanitizer for DocumentKeys {
    fn sanitize_key(&self, key: &str) -> String {
        key.trim_matches(TRIMMED)
            .chars()
            .map(|c| if is_replaced(c) { '-' } else { c })
            .take(MAX_KEY_LEN)
            .collect()
    }
}

/// Whitespace stripped from both ends: ASCII space, tab, newlines, NUL and
/// vertical tab. Unicode spaces such as U+00A0 are kept.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

#[inline]
fn is_replaced(c: char) -> bool {
    c.len_utf8() == 4
        || matches!(
            c,
            '/' | '#' | '?' | '*' | ':' | '\\' | '<' | '>' | '|' | '"' | '%' | '&' | '@' | '='
                | ';' | '+'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(key: &str) -> String {
        DocumentKeys.sanitize_key(key)
    }

    #[test]
    fn test_clean_keys_unchanged() {
        for key in ["news", "hello-world", "über", "a_b.c", "2024"] {
            assert_eq!(sanitize(key), key, "{key} should be unchanged");
        }
    }

    #[test]
    fn test_reserved_chars_replaced() {
        assert_eq!(sanitize("a?b"), "a-b");
        assert_eq!(sanitize("a:b"), "a-b");
        assert_eq!(sanitize("x&y=z"), "x-y-z");
        assert_eq!(sanitize("100%"), "100-");
        assert_eq!(sanitize("a/b"), "a-b");
    }

    #[test]
    fn test_trim_and_emoji() {
        assert_eq!(sanitize("  key "), "key");
        assert_eq!(sanitize("cat😀"), "cat-");
    }

    #[test]
    fn test_only_ascii_whitespace_trimmed() {
        assert_eq!(sanitize("\t\0key\x0B\r\n"), "key");
        assert_eq!(sanitize("\u{a0}x"), "\u{a0}x");
        assert_eq!(sanitize("x\u{2003}"), "x\u{2003}");
    }

    #[test]
    fn test_truncate() {
        let long = "a".repeat(300);
        assert_eq!(sanitize(&long).chars().count(), MAX_KEY_LEN);
    }
}
