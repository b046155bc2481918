//! Item id allocation.
//!
//! # Responsibility
//! - Hand out ids that stay unique even under rapid successive creation,
//!   e.g. a batch photo import landing within one millisecond.
//!
//! # Invariants
//! - Ids from one generator are strictly increasing.
//! - `observe` never moves the generator backwards.

use crate::model::item::ItemId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Allocates collection item ids.
///
/// Ids are epoch milliseconds, bumped monotonically whenever the clock has
/// not advanced since the previous allocation. Plain timestamps alone would
/// collide for items created in the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: ItemId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id, strictly greater than any id returned or
    /// observed before.
    pub fn next_id(&mut self) -> ItemId {
        let now = epoch_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }

    /// Advances the generator past an id seen in hydrated or imported data,
    /// so later allocations cannot collide with it.
    pub fn observe(&mut self, id: ItemId) {
        if id > self.last {
            self.last = id;
        }
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;
    use std::collections::HashSet;

    #[test]
    fn rapid_allocation_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let allocated: HashSet<_> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(allocated.len(), 1000);
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let mut previous = ids.next_id();
        for _ in 0..100 {
            let next = ids.next_id();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn observe_skips_past_imported_ids() {
        let mut ids = IdGenerator::new();
        let far_future = i64::MAX - 10;
        ids.observe(far_future);
        assert!(ids.next_id() > far_future);
    }

    #[test]
    fn observe_ignores_older_ids() {
        let mut ids = IdGenerator::new();
        let current = ids.next_id();
        ids.observe(current - 1000);
        assert!(ids.next_id() > current);
    }
}
