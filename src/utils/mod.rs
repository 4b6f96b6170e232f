//! Utility modules.

pub mod plural;

pub use plural::{Counted, plural_count};
