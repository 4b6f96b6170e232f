//! `[[fields]]` section configuration.
//!
//! Declares the slug fields of each record class. The same table backs the
//! liveness probe: a stored slug is live while its class still declares
//! its field.
//!
//! # Example
//!
//! ```toml
//! [[fields]]
//! class = "news"
//! name = "slug"
//! mandatory = true
//! action = "NewsController::detail"
//! sites = [0, 1]
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::registry::FieldActions;
use crate::slug::SlugField;

/// One slug field of a record class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub class: String,
    pub name: String,
    pub mandatory: bool,
    pub action: Option<String>,
    pub sites: Option<Vec<i64>>,
}

impl FieldConfig {
    pub const CLASS: FieldPath = FieldPath::new("fields.class");
    pub const NAME: FieldPath = FieldPath::new("fields.name");
    pub const SITES: FieldPath = FieldPath::new("fields.sites");

    pub fn to_field(&self) -> SlugField {
        SlugField {
            name: self.name.clone(),
            mandatory: self.mandatory,
            action: self.action.clone(),
            sites: self.sites.clone(),
        }
    }
}

/// Find a declared field.
pub fn find_field<'a>(
    fields: &'a [FieldConfig],
    class: &str,
    name: &str,
) -> Option<&'a FieldConfig> {
    fields.iter().find(|f| f.class == class && f.name == name)
}

/// Build the action table for the liveness probe.
pub fn field_actions(fields: &[FieldConfig]) -> FieldActions {
    let mut actions = FieldActions::new();
    for field in fields {
        actions.declare(&field.class, &field.name, field.action.clone());
    }
    actions
}

pub fn validate_fields(fields: &[FieldConfig], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();
    for (index, field) in fields.iter().enumerate() {
        if field.class.is_empty() {
            diag.error(FieldConfig::CLASS, format!("field #{} has no class", index + 1));
        }
        if field.name.is_empty() {
            diag.error(FieldConfig::NAME, format!("field #{} has no name", index + 1));
        }
        if !seen.insert((field.class.as_str(), field.name.as_str())) {
            diag.error_with_hint(
                FieldConfig::NAME,
                format!("field `{}.{}` is declared twice", field.class, field.name),
                "merge the two `[[fields]]` entries",
            );
        }
        if field
            .sites
            .as_ref()
            .is_some_and(|sites| sites.iter().any(|s| *s < 0))
        {
            diag.error(
                FieldConfig::SITES,
                format!("field `{}.{}` lists a negative site id", field.class, field.name),
            );
        }
    }
}
