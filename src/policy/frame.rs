//! Frame - one occupied slot in a policy's frame table.

use crate::common::{PageId, ProcessId};

/// The state of one occupied memory slot.
///
/// A frame records which page it holds plus the metadata the eviction
/// policies decide on: load order for FIFO, last access time for LRU and
/// list balancing, a reference bit for clock, a dirty bit for write-back
/// accounting, and active-list membership for the two-list policy.
///
/// The engine is single-threaded by contract, so the fields are plain data
/// mutated through `&mut` rather than atomics.
///
/// # Invariants
/// - A `(owner, page)` pair appears in at most one slot of a table.
/// - `loaded_at` values are strictly increasing within a table.
/// - `last_access` never exceeds the current global step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The page held by this frame.
    pub page: PageId,

    /// Owning process, or `None` in single-process mode.
    pub owner: Option<ProcessId>,

    /// Load sequence number, unique per miss. FIFO evicts the minimum.
    pub loaded_at: u64,

    /// Global step of the most recent hit or load. LRU evicts the minimum.
    pub last_access: u64,

    /// Reference bit: set on load and on every hit, cleared only by the
    /// clock sweep.
    pub ref_bit: bool,

    /// Set by any write touching the frame; cleared only when the frame is
    /// replaced.
    pub dirty: bool,

    /// Active-list membership (two-list policy). New frames start inactive.
    pub active: bool,
}

impl Frame {
    /// Build the frame for a freshly loaded page.
    pub fn load(
        page: PageId,
        owner: Option<ProcessId>,
        loaded_at: u64,
        now: u64,
        is_write: bool,
    ) -> Self {
        Self {
            page,
            owner,
            loaded_at,
            last_access: now,
            ref_bit: true,
            dirty: is_write,
            active: false,
        }
    }

    /// Whether this frame satisfies a request for `(owner, page)`.
    ///
    /// A request without an owner matches on page number alone; a request
    /// from a specific process only matches that process's frames.
    #[inline]
    pub fn matches(&self, page: PageId, owner: Option<ProcessId>) -> bool {
        self.page == page && (owner.is_none() || self.owner == owner)
    }

    /// Idle time since the last access.
    #[inline]
    pub fn idle(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_load_defaults() {
        let frame = Frame::load(PageId::new(7), None, 3, 12, false);
        assert_eq!(frame.page, PageId::new(7));
        assert_eq!(frame.loaded_at, 3);
        assert_eq!(frame.last_access, 12);
        assert!(frame.ref_bit);
        assert!(!frame.dirty);
        assert!(!frame.active);
    }

    #[test]
    fn test_frame_load_write_is_dirty() {
        let frame = Frame::load(PageId::new(7), None, 1, 0, true);
        assert!(frame.dirty);
    }

    #[test]
    fn test_frame_matches_single_process() {
        let frame = Frame::load(PageId::new(2), None, 1, 0, false);
        assert!(frame.matches(PageId::new(2), None));
        assert!(!frame.matches(PageId::new(3), None));
    }

    #[test]
    fn test_frame_matches_requires_same_owner() {
        let p0 = Some(ProcessId::new(0));
        let p1 = Some(ProcessId::new(1));
        let frame = Frame::load(PageId::new(2), p0, 1, 0, false);

        assert!(frame.matches(PageId::new(2), p0));
        assert!(!frame.matches(PageId::new(2), p1));
        // Ownerless request matches any frame with the page.
        assert!(frame.matches(PageId::new(2), None));
    }

    #[test]
    fn test_frame_idle() {
        let frame = Frame::load(PageId::new(1), None, 1, 5, false);
        assert_eq!(frame.idle(9), 4);
        assert_eq!(frame.idle(5), 0);
    }
}
