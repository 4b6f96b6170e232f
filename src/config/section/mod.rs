//! Configuration section definitions.
//!
//! Each module corresponds to a section in `slugreg.toml`:
//!
//! | Module      | TOML Section    | Purpose                              |
//! |-------------|-----------------|--------------------------------------|
//! | `store`     | `[store]`       | Slug table file                      |
//! | `documents` | `[documents]`   | Paths taken by the document tree     |
//! | `fields`    | `[[fields]]`    | Slug fields per class, probe actions |
//! | `sites`     | `[sites.<id>]`  | Site directory                       |

mod documents;
mod fields;
mod sites;
mod store;

pub use documents::{DocumentPaths, DocumentsConfig};
pub use fields::{FieldConfig, field_actions, find_field, validate_fields};
pub use sites::{SiteEntry, SitesConfig};
pub use store::StoreConfig;
