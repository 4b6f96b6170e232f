//! Command-line interface module.
//!
//! | Module   | Commands                              |
//! |----------|---------------------------------------|
//! | `write`  | `validate`, `save`, `import`, `delete` |
//! | `read`   | `load`, `export`, `resolve`           |

mod args;
mod common;
pub mod read;
pub mod write;

pub use args::{Cli, Commands, FieldArgs, OwnerArgs};
pub use common::{SlugOutput, open_registry, parse_slugs};
