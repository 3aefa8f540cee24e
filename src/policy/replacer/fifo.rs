//! FIFO (First-In-First-Out) replacement policy.
//!
//! Evicts the frame loaded earliest, regardless of how recently it was
//! used. Cheap and predictable, but famously non-monotonic in capacity
//! (Belady's anomaly — see the fixture in [`crate::trace`]).

use crate::common::PageId;
use crate::policy::replacer::{occupied, Replacer};
use crate::policy::Frame;

/// First-in-first-out eviction.
///
/// Keeps no state of its own: the load order lives in each frame's
/// `loaded_at` sequence number, assigned by the table on every miss.
#[derive(Debug, Default)]
pub struct Fifo;

impl Fifo {
    fn oldest(slots: &[Option<Frame>]) -> usize {
        occupied(slots)
            .min_by_key(|(_, f)| f.loaded_at)
            .map(|(i, _)| i)
            .unwrap_or_else(|| unreachable!("victim selection on a table with no occupied slot"))
    }
}

impl Replacer for Fifo {
    fn select_victim(&mut self, slots: &mut [Option<Frame>], _lookahead: &[PageId]) -> usize {
        Self::oldest(slots)
    }

    fn peek_victim(&self, slots: &[Option<Frame>], _lookahead: &[PageId]) -> usize {
        Self::oldest(slots)
    }

    fn slot_tag(&self, frame: &Frame, _now: u64) -> String {
        format!("SEQ:{}", frame.loaded_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::replacer::test_util::table;

    #[test]
    fn test_fifo_evicts_oldest_load() {
        let mut slots = table(&[(1, 3, 9), (2, 1, 0), (3, 2, 5)]);
        let mut fifo = Fifo;

        assert_eq!(fifo.select_victim(&mut slots, &[]), 1);
    }

    #[test]
    fn test_fifo_ignores_recency() {
        // Slot 0 was loaded first but touched most recently; FIFO still
        // evicts it.
        let mut slots = table(&[(1, 1, 99), (2, 2, 0), (3, 3, 1)]);
        let mut fifo = Fifo;

        assert_eq!(fifo.select_victim(&mut slots, &[]), 0);
    }

    #[test]
    fn test_fifo_peek_matches_select() {
        let mut slots = table(&[(4, 7, 0), (5, 5, 0), (6, 6, 0)]);
        let fifo = Fifo;

        let peeked = fifo.peek_victim(&slots, &[]);
        let mut fifo = Fifo;
        assert_eq!(fifo.select_victim(&mut slots, &[]), peeked);
    }

    #[test]
    fn test_fifo_tag_shows_load_order() {
        let slots = table(&[(1, 12, 0)]);
        let fifo = Fifo;
        let frame = slots[0].as_ref().unwrap();

        assert_eq!(fifo.slot_tag(frame, 0), "SEQ:12");
    }
}
