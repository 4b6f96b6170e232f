//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads. `main` publishes the loaded
//! `slugreg.toml` once; each CLI command reads it back through [`cfg`].

use crate::config::SlugregConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<SlugregConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SlugregConfig::default()));

#[inline]
pub fn cfg() -> Arc<SlugregConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: SlugregConfig) -> Arc<SlugregConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

/// Serializes tests that publish a config.
#[cfg(test)]
pub(crate) static TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
