//! Owner contexts: where inside a record a slug field lives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record identifier.
pub type RecordId = u64;

/// Position of a slug field inside a record's structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerContext {
    /// Field declared directly on the record.
    PlainRecord { record_id: RecordId },
    /// Field inside a translation, optionally nested in a container.
    Localized {
        record_id: RecordId,
        locale: String,
        container: Option<Container>,
    },
    /// Field inside one item of a repeatable collection.
    CollectionItem {
        record_id: RecordId,
        field: String,
        index: usize,
    },
    /// Field inside one variant of a polymorphic sub-block.
    SubBlockVariant {
        record_id: RecordId,
        field: String,
        variant: String,
    },
}

/// Container holding a localized field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    CollectionItem { field: String, index: usize },
    SubBlockVariant { field: String, variant: String },
}

impl OwnerContext {
    pub fn record(record_id: RecordId) -> Self {
        Self::PlainRecord { record_id }
    }

    pub fn localized(record_id: RecordId, locale: impl Into<String>) -> Self {
        Self::Localized {
            record_id,
            locale: locale.into(),
            container: None,
        }
    }

    pub fn collection_item(record_id: RecordId, field: impl Into<String>, index: usize) -> Self {
        Self::CollectionItem {
            record_id,
            field: field.into(),
            index,
        }
    }

    pub fn sub_block(
        record_id: RecordId,
        field: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self::SubBlockVariant {
            record_id,
            field: field.into(),
            variant: variant.into(),
        }
    }

    /// Nest a localized context inside a container.
    ///
    /// Has no effect on non-localized contexts.
    pub fn within(mut self, outer: Container) -> Self {
        if let Self::Localized { container, .. } = &mut self {
            *container = Some(outer);
        }
        self
    }

    /// Identifier of the owning top-level record.
    pub const fn record_id(&self) -> RecordId {
        match self {
            Self::PlainRecord { record_id }
            | Self::Localized { record_id, .. }
            | Self::CollectionItem { record_id, .. }
            | Self::SubBlockVariant { record_id, .. } => *record_id,
        }
    }
}

/// Owner type tag stored with every slug row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Object,
    FieldCollection,
    LocalizedField,
    ObjectBrick,
}

impl OwnerType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::FieldCollection => "fieldcollection",
            Self::LocalizedField => "localizedfield",
            Self::ObjectBrick => "objectbrick",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
