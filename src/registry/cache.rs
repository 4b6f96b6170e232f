//! Load cache keyed by owner filter.
//!
//! Records hash onto a fixed set of generation stripes. A load takes a
//! [`Ticket`] before reading the store and may only fill the cache if its
//! stripe is unchanged, so a load racing a save never caches pre-save rows.
//! Memory for generations stays constant however many records pass through.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::address::{OwnerFilter, RecordId};
use crate::slug::SlugValue;

const STRIPES: usize = 64;

#[inline]
fn stripe(record_id: RecordId) -> usize {
    (record_id % STRIPES as RecordId) as usize
}

/// Generation snapshot taken before a store read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    stripe: usize,
    generation: u64,
}

/// Loaded slug sets, invalidated per record.
#[derive(Debug)]
pub struct LoadCache {
    entries: DashMap<OwnerFilter, Arc<[SlugValue]>>,
    /// Fills hold the read side, invalidations the write side.
    generations: RwLock<[u64; STRIPES]>,
}

impl Default for LoadCache {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            generations: RwLock::new([0; STRIPES]),
        }
    }
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filter: &OwnerFilter) -> Option<Vec<SlugValue>> {
        self.entries.get(filter).map(|values| values.to_vec())
    }

    pub fn ticket(&self, record_id: RecordId) -> Ticket {
        let stripe = stripe(record_id);
        Ticket {
            stripe,
            generation: self.generations.read()[stripe],
        }
    }

    /// Cache a loaded set, unless its record stripe changed since `ticket`.
    pub fn fill(&self, ticket: Ticket, filter: OwnerFilter, values: &[SlugValue]) -> bool {
        let generations = self.generations.read();
        if generations[ticket.stripe] != ticket.generation {
            return false;
        }
        self.entries.insert(filter, values.into());
        true
    }

    /// Drop every cached set of a record.
    pub fn invalidate(&self, record_id: RecordId) {
        let mut generations = self.generations.write();
        generations[stripe(record_id)] += 1;
        self.entries.retain(|filter, _| filter.record_id != record_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::OwnerContext;

    #[test]
    fn test_fill_and_get() {
        let cache = LoadCache::new();
        let filter = OwnerContext::record(1).filter("slug");
        let values = vec![SlugValue::new("/a", Some(0))];

        assert!(cache.get(&filter).is_none());
        let ticket = cache.ticket(1);
        assert!(cache.fill(ticket, filter.clone(), &values));
        assert_eq!(cache.get(&filter), Some(values));
    }

    #[test]
    fn test_invalidate_is_per_record() {
        let cache = LoadCache::new();
        let one = OwnerContext::record(1).filter("slug");
        let one_en = OwnerContext::localized(1, "en").filter("slug");
        let two = OwnerContext::record(2).filter("slug");
        for filter in [&one, &one_en, &two] {
            let ticket = cache.ticket(filter.record_id);
            cache.fill(ticket, filter.clone(), &[]);
        }

        cache.invalidate(1);
        assert!(cache.get(&one).is_none());
        assert!(cache.get(&one_en).is_none());
        assert!(cache.get(&two).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_ticket_is_rejected() {
        let cache = LoadCache::new();
        let filter = OwnerContext::record(1).filter("slug");

        let ticket = cache.ticket(1);
        cache.invalidate(1);
        assert!(!cache.fill(ticket, filter.clone(), &[]));
        assert!(cache.is_empty());

        let ticket = cache.ticket(1);
        assert!(cache.fill(ticket, filter, &[]));
    }

    #[test]
    fn test_unrelated_stripe_keeps_ticket() {
        let cache = LoadCache::new();
        let filter = OwnerContext::record(1).filter("slug");

        let ticket = cache.ticket(1);
        for record_id in 2..(STRIPES as RecordId) {
            cache.invalidate(record_id);
        }
        assert!(cache.fill(ticket, filter.clone(), &[]));

        // A record sharing the stripe skips the fill.
        let ticket = cache.ticket(1);
        cache.invalidate(1 + STRIPES as RecordId);
        assert!(!cache.fill(ticket, filter, &[]));
    }
}
