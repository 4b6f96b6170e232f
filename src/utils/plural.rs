//! Counted nouns for log lines and error headings.

use std::fmt;

/// A count followed by its noun, pluralized on display.
///
/// Nouns ending in a consonant followed by `y` take `ies` ("1 entry",
/// "2 entries"); every other noun takes `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counted<'a> {
    pub count: usize,
    pub noun: &'a str,
}

impl fmt::Display for Counted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            return write!(f, "1 {}", self.noun);
        }
        match self.noun.strip_suffix('y') {
            Some(stem) if stem.ends_with(|c: char| !"aeiou".contains(c)) => {
                write!(f, "{} {}ies", self.count, stem)
            }
            _ => write!(f, "{} {}s", self.count, self.noun),
        }
    }
}

/// `plural_count(3, "slug")` is `"3 slugs"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    Counted { count, noun }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "slug"), "0 slugs");
        assert_eq!(plural_count(1, "slug"), "1 slug");
        assert_eq!(plural_count(3, "row"), "3 rows");
    }

    #[test]
    fn test_consonant_y_nouns() {
        assert_eq!(plural_count(2, "entry"), "2 entries");
        assert_eq!(plural_count(1, "entry"), "1 entry");
        assert_eq!(plural_count(2, "key"), "2 keys");
        assert_eq!(plural_count(0, "y"), "0 ys");
    }
}
