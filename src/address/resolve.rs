//! Owner address resolution and load filters.

use serde::{Deserialize, Serialize};

use super::owner::{Container, OwnerContext, OwnerType, RecordId};
use crate::store::SlugRecord;

/// Owner name used for top-level localized fields.
const LOCALIZED_OWNER: &str = "localizedfield";

/// Positional address of a slug field inside its record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerAddress {
    #[serde(rename = "ownertype")]
    pub owner_type: OwnerType,
    #[serde(rename = "ownername", default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl OwnerAddress {
    fn new(owner_type: OwnerType, owner_name: Option<String>, position: Option<String>) -> Self {
        Self {
            owner_type,
            owner_name,
            position,
        }
    }
}

/// How a load filter matches the stored owner name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameMatch {
    Any,
    Exact(String),
    Prefix(String),
}

impl NameMatch {
    fn matches(&self, name: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => name == Some(expected.as_str()),
            Self::Prefix(prefix) => name.is_some_and(|n| n.starts_with(prefix.as_str())),
        }
    }
}

/// Row filter used to load the slugs of one owner field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerFilter {
    pub record_id: RecordId,
    pub field: String,
    pub owner_type: OwnerType,
    pub owner_name: NameMatch,
    /// Required position, `None` matches any.
    pub position: Option<String>,
}

impl OwnerFilter {
    /// Check whether a stored row belongs to this owner field.
    pub fn matches(&self, row: &SlugRecord) -> bool {
        row.record_id == self.record_id
            && row.field_name == self.field
            && row.address.owner_type == self.owner_type
            && self.owner_name.matches(row.address.owner_name.as_deref())
            && self
                .position
                .as_ref()
                .is_none_or(|p| row.address.position.as_ref() == Some(p))
    }
}

impl OwnerContext {
    /// Resolve the storage address of this context.
    ///
    /// | Context          | ownertype         | ownername                 | position |
    /// |------------------|-------------------|---------------------------|----------|
    /// | `PlainRecord`    | `object`          | -                         | -        |
    /// | `CollectionItem` | `fieldcollection` | collection field          | index    |
    /// | `SubBlockVariant`| `objectbrick`     | block field               | variant  |
    /// | `Localized`      | `localizedfield`  | `localizedfield` or path  | locale   |
    pub fn address(&self) -> OwnerAddress {
        match self {
            Self::PlainRecord { .. } => OwnerAddress::new(OwnerType::Object, None, None),
            Self::CollectionItem { field, index, .. } => OwnerAddress::new(
                OwnerType::FieldCollection,
                Some(field.clone()),
                Some(index.to_string()),
            ),
            Self::SubBlockVariant { field, variant, .. } => OwnerAddress::new(
                OwnerType::ObjectBrick,
                Some(field.clone()),
                Some(variant.clone()),
            ),
            Self::Localized {
                locale, container, ..
            } => {
                let name = match container {
                    None => LOCALIZED_OWNER.to_string(),
                    Some(container) => format!(
                        "{}{}~{}",
                        container_prefix(container),
                        LOCALIZED_OWNER,
                        LOCALIZED_OWNER
                    ),
                };
                OwnerAddress::new(OwnerType::LocalizedField, Some(name), Some(locale.clone()))
            }
        }
    }

    /// Build the load filter for a field of this context.
    ///
    /// A top-level translation matches any owner name for its locale; a
    /// nested one matches the prefix of its container.
    pub fn filter(&self, field: &str) -> OwnerFilter {
        let address = self.address();
        let owner_name = match self {
            Self::PlainRecord { .. } => NameMatch::Any,
            Self::CollectionItem { field, .. } | Self::SubBlockVariant { field, .. } => {
                NameMatch::Exact(field.clone())
            }
            Self::Localized {
                container: None, ..
            } => NameMatch::Any,
            Self::Localized {
                container: Some(container),
                ..
            } => NameMatch::Prefix(container_prefix(container)),
        };

        OwnerFilter {
            record_id: self.record_id(),
            field: field.to_string(),
            owner_type: address.owner_type,
            owner_name,
            position: address.position,
        }
    }
}

/// `/<ownertype>~<field>/<index-or-variant>/`
fn container_prefix(container: &Container) -> String {
    match container {
        Container::CollectionItem { field, index } => {
            format!("/{}~{}/{}/", OwnerType::FieldCollection, field, index)
        }
        Container::SubBlockVariant { field, variant } => {
            format!("/{}~{}/{}/", OwnerType::ObjectBrick, field, variant)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Container;

    fn row(record_id: RecordId, field: &str, address: OwnerAddress) -> SlugRecord {
        SlugRecord {
            path: "/x".into(),
            site_id: 0,
            record_id,
            class_id: "news".into(),
            field_name: field.into(),
            address,
        }
    }

    #[test]
    fn test_plain_address() {
        let address = OwnerContext::record(1).address();
        assert_eq!(address, OwnerAddress::new(OwnerType::Object, None, None));
    }

    #[test]
    fn test_collection_and_brick_address() {
        let address = OwnerContext::collection_item(1, "items", 3).address();
        assert_eq!(address.owner_type, OwnerType::FieldCollection);
        assert_eq!(address.owner_name.as_deref(), Some("items"));
        assert_eq!(address.position.as_deref(), Some("3"));

        let address = OwnerContext::sub_block(1, "bricks", "Teaser").address();
        assert_eq!(address.owner_type, OwnerType::ObjectBrick);
        assert_eq!(address.owner_name.as_deref(), Some("bricks"));
        assert_eq!(address.position.as_deref(), Some("Teaser"));
    }

    #[test]
    fn test_localized_address() {
        let address = OwnerContext::localized(1, "en").address();
        assert_eq!(address.owner_type, OwnerType::LocalizedField);
        assert_eq!(address.owner_name.as_deref(), Some("localizedfield"));
        assert_eq!(address.position.as_deref(), Some("en"));

        let nested = OwnerContext::localized(1, "en").within(Container::CollectionItem {
            field: "items".into(),
            index: 2,
        });
        assert_eq!(
            nested.address().owner_name.as_deref(),
            Some("/fieldcollection~items/2/localizedfield~localizedfield")
        );

        let nested = OwnerContext::localized(1, "en").within(Container::SubBlockVariant {
            field: "bricks".into(),
            variant: "Teaser".into(),
        });
        assert_eq!(
            nested.address().owner_name.as_deref(),
            Some("/objectbrick~bricks/Teaser/localizedfield~localizedfield")
        );
    }

    #[test]
    fn test_address_is_deterministic() {
        let ctx = OwnerContext::collection_item(5, "items", 1);
        assert_eq!(ctx.address(), ctx.address());
    }

    #[test]
    fn test_filter_matches_own_rows() {
        let contexts = [
            OwnerContext::record(1),
            OwnerContext::collection_item(1, "items", 0),
            OwnerContext::sub_block(1, "bricks", "Teaser"),
            OwnerContext::localized(1, "en"),
            OwnerContext::localized(1, "en").within(Container::CollectionItem {
                field: "items".into(),
                index: 0,
            }),
        ];
        for ctx in &contexts {
            let filter = ctx.filter("slug");
            assert!(filter.matches(&row(1, "slug", ctx.address())), "{ctx:?}");
            assert!(!filter.matches(&row(2, "slug", ctx.address())), "{ctx:?}");
            assert!(!filter.matches(&row(1, "other", ctx.address())), "{ctx:?}");
        }
    }

    #[test]
    fn test_filter_separates_positions() {
        let filter = OwnerContext::collection_item(1, "items", 0).filter("slug");
        let other_item = OwnerContext::collection_item(1, "items", 1).address();
        assert!(!filter.matches(&row(1, "slug", other_item)));

        let filter = OwnerContext::localized(1, "en").filter("slug");
        let german = OwnerContext::localized(1, "de").address();
        assert!(!filter.matches(&row(1, "slug", german)));
    }

    #[test]
    fn test_nested_localized_filter_uses_prefix() {
        let item = |index| Container::CollectionItem {
            field: "items".into(),
            index,
        };
        let filter = OwnerContext::localized(1, "en").within(item(0)).filter("slug");
        assert_eq!(
            filter.owner_name,
            NameMatch::Prefix("/fieldcollection~items/0/".into())
        );

        let same = OwnerContext::localized(1, "en").within(item(0)).address();
        let other = OwnerContext::localized(1, "en").within(item(1)).address();
        assert!(filter.matches(&row(1, "slug", same)));
        assert!(!filter.matches(&row(1, "slug", other)));
    }
}
