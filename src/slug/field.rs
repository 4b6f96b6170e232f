//! Slug field definition.

use serde::{Deserialize, Serialize};

/// Settings of one slug-carrying field of a record class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugField {
    /// Field name, e.g. `slug`.
    pub name: String,
    /// Require at least one non-empty slug.
    pub mandatory: bool,
    /// Action a live slug of this field resolves to.
    pub action: Option<String>,
    /// Sites offered for this field (`None` = all sites).
    pub sites: Option<Vec<i64>>,
}

impl SlugField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}
