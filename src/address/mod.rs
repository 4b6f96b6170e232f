//! Owner addressing - where a slug field lives inside a record.
//!
//! One slug table serves every record shape. Each row carries an address
//! that says which part of the record owns it:
//!
//! ```text
//! record 42
//! ├── slug                         -> object
//! ├── localized[en].slug           -> localizedfield / localizedfield / en
//! ├── items[3].slug                -> fieldcollection / items / 3
//! ├── items[3].localized[de].slug  -> localizedfield / /fieldcollection~items/3/... / de
//! └── bricks<Teaser>.slug          -> objectbrick / bricks / Teaser
//! ```
//!
//! # Module Structure
//!
//! - [`owner`]: `OwnerContext`, the closed set of container shapes
//! - [`resolve`]: address derivation and load filters

mod owner;
mod resolve;

pub use owner::{Container, OwnerContext, OwnerType, RecordId};
pub use resolve::{NameMatch, OwnerAddress, OwnerFilter};
