//! Site directory used when displaying slugs.

/// Resolves the main domain of a site.
pub trait SiteLookup: Send + Sync {
    fn main_domain(&self, site_id: i64) -> Option<String>;
}

/// Site directory with no sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSites;

impl SiteLookup for NoSites {
    fn main_domain(&self, _site_id: i64) -> Option<String> {
        None
    }
}
