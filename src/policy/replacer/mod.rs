//! Eviction policy implementations (replacers).
//!
//! Each replacer owns the policy-specific side of one eviction discipline:
//! how a hit touches the frame, how a placement moves its cursor, which
//! occupied slot becomes the victim, and how a slot is tagged for display.
//! The shared table mechanics (lookup, counters, free-slot fill, dirty
//! accounting) live in [`PolicyState`](crate::policy::PolicyState).
//!
//! Implements:
//! - [`Fifo`] - evict the oldest load
//! - [`Lru`] - evict the least recently used frame
//! - [`Optimal`] - offline lookahead, evict the page used furthest in the future
//! - [`Clock`] - second-chance approximation of LRU
//! - [`TwoList`] - active/inactive list approximation of LRU

mod clock;
mod fifo;
mod lru;
mod optimal;
mod two_list;

pub use clock::Clock;
pub use fifo::Fifo;
pub use lru::Lru;
pub use optimal::Optimal;
pub use two_list::TwoList;

use crate::common::PageId;
use crate::policy::Frame;

/// One eviction discipline's strategy surface.
///
/// `select_victim` and `peek_victim` are a mutating/non-mutating pair over
/// the same comparator: `peek_victim` must report the slot `select_victim`
/// would choose without changing reference bits, cursors, or list
/// membership. Both are only called on fully occupied tables; running them
/// against a table with an empty slot is a caller bug.
pub trait Replacer: std::fmt::Debug {
    /// Policy-specific bookkeeping for a hit on `slot`. The table has
    /// already refreshed `last_access`.
    fn touch(&mut self, _slots: &mut [Option<Frame>], _slot: usize) {}

    /// Bookkeeping after a new frame lands in `slot`, whether it filled a
    /// free slot or replaced a victim.
    fn placed(&mut self, _slot: usize, _capacity: usize) {}

    /// Choose the victim slot. May advance cursors and clear reference bits.
    ///
    /// # Panics
    /// Panics if no slot is occupied; the table only evicts when full.
    fn select_victim(&mut self, slots: &mut [Option<Frame>], lookahead: &[PageId]) -> usize;

    /// The slot `select_victim` would choose, without mutating anything.
    fn peek_victim(&self, slots: &[Option<Frame>], lookahead: &[PageId]) -> usize;

    /// Human-readable per-slot tag for display snapshots.
    fn slot_tag(&self, frame: &Frame, now: u64) -> String;

    /// Clock-hand position, for policies that keep one.
    fn hand(&self) -> Option<usize> {
        None
    }
}

/// Iterate occupied slots as `(index, frame)` pairs.
pub(crate) fn occupied(slots: &[Option<Frame>]) -> impl Iterator<Item = (usize, &Frame)> {
    slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().map(|f| (i, f)))
}

/// Index of the occupied slot with the smallest `last_access`.
/// Ties resolve to the lowest slot index.
///
/// # Panics
/// Panics if no slot is occupied.
pub(crate) fn min_last_access(slots: &[Option<Frame>]) -> usize {
    occupied(slots)
        .min_by_key(|(_, f)| f.last_access)
        .map(|(i, _)| i)
        .unwrap_or_else(|| unreachable!("victim selection on a table with no occupied slot"))
}


#[cfg(test)]
mod tests {
    use super::test_util::table;
    use super::*;

    #[test]
    fn test_occupied_skips_empty_slots() {
        let mut slots = table(&[(1, 1, 0), (2, 2, 1)]);
        slots.insert(1, None);

        let seen: Vec<usize> = occupied(&slots).map(|(i, _)| i).collect();
        assert_eq!(seen, vec![0, 2]);
    }

    #[test]
    fn test_min_last_access_prefers_lowest_index_on_tie() {
        let slots = table(&[(1, 1, 5), (2, 2, 5), (3, 3, 9)]);
        assert_eq!(min_last_access(&slots), 0);
    }
}
