//! Two-list (active/inactive) replacement policy.
//!
//! Approximates LRU with a single membership bit instead of a full
//! ordering: frames are loaded inactive, promoted to the active list on a
//! hit, and the active list is capped at half of capacity by demoting its
//! stalest member. Eviction drains the inactive list first.

use crate::common::PageId;
use crate::policy::replacer::{min_last_access, occupied, Replacer};
use crate::policy::Frame;

/// Active/inactive list eviction.
///
/// List membership lives in each frame's `active` flag; the policy itself
/// is stateless.
#[derive(Debug, Default)]
pub struct TwoList;

impl TwoList {
    /// Victim slot: stalest inactive frame, or stalest frame overall when
    /// the inactive list is empty.
    fn stalest(slots: &[Option<Frame>]) -> usize {
        occupied(slots)
            .filter(|(_, f)| !f.active)
            .min_by_key(|(_, f)| f.last_access)
            .map(|(i, _)| i)
            .unwrap_or_else(|| min_last_access(slots))
    }

    /// Cap the active list at `capacity / 2` by demoting its least
    /// recently used member.
    fn rebalance(slots: &mut [Option<Frame>]) {
        let capacity = slots.len();
        let active_count = occupied(slots).filter(|(_, f)| f.active).count();

        if active_count > capacity / 2 {
            let demote = occupied(slots)
                .filter(|(_, f)| f.active)
                .min_by_key(|(_, f)| f.last_access)
                .map(|(i, _)| i)
                .unwrap_or_else(|| unreachable!("active list counted non-empty"));

            if let Some(frame) = slots[demote].as_mut() {
                frame.active = false;
            }
        }
    }
}

impl Replacer for TwoList {
    fn touch(&mut self, slots: &mut [Option<Frame>], slot: usize) {
        if let Some(frame) = slots[slot].as_mut() {
            frame.active = true;
        }
        Self::rebalance(slots);
    }

    fn select_victim(&mut self, slots: &mut [Option<Frame>], _lookahead: &[PageId]) -> usize {
        Self::stalest(slots)
    }

    fn peek_victim(&self, slots: &[Option<Frame>], _lookahead: &[PageId]) -> usize {
        Self::stalest(slots)
    }

    fn slot_tag(&self, frame: &Frame, now: u64) -> String {
        let list = if frame.active { "ACT" } else { "INA" };
        format!("{}:{}", list, frame.idle(now))
    }
}
