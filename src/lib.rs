//! Slug registry - unique URL slugs for structured records.
//!
//! Records carry slug fields at different positions (directly, inside a
//! translation, a collection item or a sub-block variant). Every slug is
//! stored in one table keyed by `(path, site)`, so a path resolves to at
//! most one owner per site.
//!
//! # Module Structure
//!
//! ```text
//! slugreg/
//! ├── slug/       # SlugValue, path rules, equality, interchange
//! ├── address/    # OwnerContext -> stored owner address
//! ├── store/      # SlugStore trait, memory and JSON file tables
//! ├── registry/   # save protocol, liveness probe, load cache
//! ├── config/     # slugreg.toml
//! ├── cli/        # command-line interface
//! └── logger      # log!/debug! macros
//! ```

pub mod logger;

pub mod address;
pub mod cli;
pub mod config;
pub mod registry;
pub mod slug;
pub mod store;
pub mod utils;

pub use address::{OwnerContext, RecordId};
pub use registry::{RegistryError, SlugRegistry};
pub use slug::{SlugField, SlugValue};
pub use store::{FileStore, MemoryStore, SlugStore};
