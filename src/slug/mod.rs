//! Slug values and the rules that apply to them.
//!
//! # Module Structure
//!
//! - [`value`]: `SlugValue`, a path plus optional site
//! - [`field`]: `SlugField`, per-field settings (mandatory, action)
//! - [`path`]: path grammar and set validation
//! - [`sanitize`]: document key sanitization used as the segment oracle
//! - [`compare`]: change detection, emptiness, previews
//! - [`interchange`]: `path:site` text form
//! - [`site`]: site directory for display
//! - [`diagnostics`]: validation error types

mod compare;
mod diagnostics;
mod field;
mod interchange;
mod path;
mod sanitize;
mod site;
mod value;

pub use compare::{equals, is_empty, preview};
pub use diagnostics::{PathError, SlugDiagnostics, ValidationError};
pub use field::SlugField;
pub use interchange::{InterchangeError, from_csv, parse_item, to_csv};
pub use path::{DocumentTree, NoDocuments, PathValidator};
pub use sanitize::{DocumentKeys, KeySanitizer, MAX_KEY_LEN};
pub use site::{NoSites, SiteLookup};
pub use value::{DEFAULT_SITE, SlugValue};
