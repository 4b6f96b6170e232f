//! Slug value type.

use serde::{Deserialize, Serialize};

use crate::store::SlugRecord;

/// Site id used when a slug is not bound to any site.
pub const DEFAULT_SITE: i64 = 0;

/// A URL slug attached to a record field.
///
/// Serializes to the structured interchange form:
/// `{"slug": "/a/b", "siteId": 1}` (`action` only once resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugValue {
    /// URL path, e.g. `/news/hello-world`. Empty means "no slug".
    #[serde(rename = "slug")]
    pub path: String,
    /// Site scope; `None` means the default scope.
    #[serde(default)]
    pub site_id: Option<i64>,
    /// Action this slug resolves to (only set by a lookup).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl SlugValue {
    pub fn new(path: impl Into<String>, site_id: Option<i64>) -> Self {
        Self {
            path: path.into(),
            site_id,
            action: None,
        }
    }

    /// Rebuild a value from a persisted row.
    pub fn from_record(record: &SlugRecord) -> Self {
        Self::new(record.path.clone(), Some(record.site_id))
    }

    /// Attach a resolved action.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Site id as stored: an absent site becomes [`DEFAULT_SITE`].
    #[inline]
    pub fn effective_site_id(&self) -> i64 {
        self.site_id.unwrap_or(DEFAULT_SITE)
    }

    /// Check whether this value carries a path.
    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_site_id() {
        assert_eq!(SlugValue::new("/a", None).effective_site_id(), 0);
        assert_eq!(SlugValue::new("/a", Some(3)).effective_site_id(), 3);
    }

    #[test]
    fn test_json_contract() {
        let value = SlugValue::new("/a/b", Some(1));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"slug": "/a/b", "siteId": 1}));

        let resolved = value.with_action("NewsController::detail");
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["action"], "NewsController::detail");
    }

    #[test]
    fn test_json_import_without_site() {
        let value: SlugValue = serde_json::from_str(r#"{"slug": "/x"}"#).unwrap();
        assert_eq!(value, SlugValue::new("/x", None));
    }
}
