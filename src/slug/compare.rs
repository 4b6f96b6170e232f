//! Change detection and display helpers for slug sets.

use super::value::SlugValue;

/// Check whether two slug sets are equal for change detection.
///
/// Compares the ordered `(path, site)` sequence; an absent site equals site
/// `0`, and reordering counts as a change. Actions are ignored.
pub fn equals(old: &[SlugValue], new: &[SlugValue]) -> bool {
    old.len() == new.len()
        && old
            .iter()
            .zip(new)
            .all(|(a, b)| a.path == b.path && a.effective_site_id() == b.effective_site_id())
}

/// Check whether a slug set carries no slug at all.
pub fn is_empty(values: &[SlugValue]) -> bool {
    !values.iter().any(SlugValue::has_path)
}

/// Render a slug set for version previews, one slug per line.
///
/// Returns `None` for an empty set.
///
/// # Examples
///
/// - `[/a, /b @ 2]` with `"\n"` -> `"/a\n/b : 2"`
pub fn preview(values: &[SlugValue], line_break: &str) -> Option<String> {
    if values.is_empty() {
        return None;
    }

    let lines: Vec<String> = values
        .iter()
        .map(|value| match value.site_id {
            Some(site) if site != 0 => format!("{} : {}", value.path, site),
            _ => value.path.clone(),
        })
        .collect();
    Some(lines.join(line_break))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(items: &[(&str, Option<i64>)]) -> Vec<SlugValue> {
        items
            .iter()
            .map(|(path, site)| SlugValue::new(*path, *site))
            .collect()
    }

    #[test]
    fn test_equal_sets() {
        let a = slugs(&[("/a", Some(1)), ("/b", None)]);
        let b = slugs(&[("/a", Some(1)), ("/b", None)]);
        assert!(equals(&a, &b));
        assert!(equals(&[], &[]));
    }

    #[test]
    fn test_order_matters() {
        let a = slugs(&[("/a", None), ("/b", None)]);
        let b = slugs(&[("/b", None), ("/a", None)]);
        assert!(!equals(&a, &b));
    }

    #[test]
    fn test_absent_site_equals_default() {
        let a = slugs(&[("/a", None)]);
        let b = slugs(&[("/a", Some(0))]);
        assert!(equals(&a, &b));
        assert!(!equals(&a, &slugs(&[("/a", Some(1))])));
    }

    #[test]
    fn test_action_ignored() {
        let a = slugs(&[("/a", None)]);
        let b = vec![SlugValue::new("/a", None).with_action("x")];
        assert!(equals(&a, &b));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&[]));
        assert!(is_empty(&slugs(&[("", Some(1))])));
        assert!(!is_empty(&slugs(&[("", None), ("/a", None)])));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview(&[], "<br />"), None);
        let values = slugs(&[("/a", None), ("/b", Some(2)), ("/c", Some(0))]);
        assert_eq!(
            preview(&values, "<br />").as_deref(),
            Some("/a<br />/b : 2<br />/c")
        );
    }
}
