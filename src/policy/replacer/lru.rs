//! LRU (Least Recently Used) replacement policy.

use crate::common::PageId;
use crate::policy::replacer::{min_last_access, Replacer};
use crate::policy::Frame;

/// Least-recently-used eviction.
///
/// The recency ordering lives entirely in the frames' `last_access` stamps,
/// which the table refreshes on every hit and load. The true LRU baseline
/// the clock and two-list policies approximate.
#[derive(Debug, Default)]
pub struct Lru;

impl Replacer for Lru {
    fn select_victim(&mut self, slots: &mut [Option<Frame>], _lookahead: &[PageId]) -> usize {
        min_last_access(slots)
    }

    fn peek_victim(&self, slots: &[Option<Frame>], _lookahead: &[PageId]) -> usize {
        min_last_access(slots)
    }

    fn slot_tag(&self, frame: &Frame, now: u64) -> String {
        format!("IDLE:{}", frame.idle(now))
    }
}
