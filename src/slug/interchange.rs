//! Flat text interchange for slug sets.
//!
//! ```text
//! [/a @ 1, /b @ none]  <->  "/a:1,/b:"
//! ```
//!
//! The site id is taken from the text after the last `:` of each item.

use thiserror::Error;

use super::value::SlugValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterchangeError {
    #[error("invalid site id `{site}` in slug item `{item}`")]
    InvalidSite { item: String, site: String },
}

/// Serialize a slug set to `path:site` pairs joined by `,`.
///
/// An absent site id is written as an empty string.
pub fn to_csv(values: &[SlugValue]) -> String {
    values
        .iter()
        .map(|value| match value.site_id {
            Some(site) => format!("{}:{}", value.path, site),
            None => format!("{}:", value.path),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a slug set written by [`to_csv`].
///
/// An empty input yields an empty set; an empty or missing site id yields an
/// absent site.
pub fn from_csv(input: &str) -> Result<Vec<SlugValue>, InterchangeError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    input.split(',').map(parse_item).collect()
}

/// Parse one `path[:site]` item.
pub fn parse_item(item: &str) -> Result<SlugValue, InterchangeError> {
    let Some((path, site)) = item.rsplit_once(':') else {
        return Ok(SlugValue::new(item, None));
    };

    let site_id = match site.trim() {
        "" => None,
        raw => Some(raw.parse().map_err(|_| InterchangeError::InvalidSite {
            item: item.to_string(),
            site: raw.to_string(),
        })?),
    };
    Ok(SlugValue::new(path, site_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::equals;

    #[test]
    fn test_export() {
        let values = vec![SlugValue::new("/a", Some(1)), SlugValue::new("/b", None)];
        assert_eq!(to_csv(&values), "/a:1,/b:");
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_import_round_trip() {
        let values = from_csv("/a:1,/b:").unwrap();
        assert_eq!(
            values,
            vec![SlugValue::new("/a", Some(1)), SlugValue::new("/b", None)]
        );
        assert!(equals(&values, &from_csv(&to_csv(&values)).unwrap()));
    }

    #[test]
    fn test_import_edge_cases() {
        assert!(from_csv("").unwrap().is_empty());
        assert_eq!(from_csv("/a").unwrap(), vec![SlugValue::new("/a", None)]);
        assert_eq!(
            from_csv("/a:x"),
            Err(InterchangeError::InvalidSite {
                item: "/a:x".into(),
                site: "x".into()
            })
        );
    }
}
