//! PolicyState - one eviction discipline's frame table.

use log::trace;

use crate::common::{PageId, ProcessId};
use crate::policy::replacer::{Clock, Fifo, Lru, Optimal, Replacer, TwoList};
use crate::policy::{AccessStatus, EvictedPage, Frame, Outcome, PolicyKind};
use crate::trace::AccessOp;

/// One policy's fixed-capacity frame table plus its counters.
///
/// The table owns the mechanics every policy shares — resident lookup,
/// counter bookkeeping, fill-a-free-slot-first placement, dirty write-back
/// accounting — and delegates the policy-specific decisions (hit touch,
/// victim choice, display tags) to its [`Replacer`].
///
/// # Lifecycle
/// Created empty at simulation start, mutated exclusively through
/// [`process`](Self::process), and rebuilt wholesale on reset. Capacity is
/// fixed for the table's lifetime; changing it means building a new table.
#[derive(Debug)]
pub struct PolicyState {
    kind: PolicyKind,
    capacity: usize,
    slots: Vec<Option<Frame>>,

    total_accesses: u64,
    miss_count: u64,
    write_back_count: u64,

    /// Next `loaded_at` value to assign; strictly increasing per miss.
    load_counter: u64,

    replacer: Box<dyn Replacer>,
}

fn build_replacer(kind: PolicyKind) -> Box<dyn Replacer> {
    match kind {
        PolicyKind::Fifo => Box::new(Fifo),
        PolicyKind::Lru => Box::new(Lru),
        PolicyKind::Optimal => Box::new(Optimal),
        PolicyKind::Clock => Box::new(Clock::new()),
        PolicyKind::TwoList => Box::new(TwoList),
    }
}

impl PolicyState {
    /// Create an empty table for one policy.
    ///
    /// The caller (the simulator) validates capacity; the table itself
    /// only refuses the degenerate zero.
    pub fn new(kind: PolicyKind, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            kind,
            capacity,
            slots: (0..capacity).map(|_| None).collect(),
            total_accesses: 0,
            miss_count: 0,
            write_back_count: 0,
            load_counter: 0,
            replacer: build_replacer(kind),
        }
    }

    /// Reinitialize to the empty/zeroed state, including policy cursors.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind, self.capacity);
    }

    // ========================================================================
    // Public API: process one access
    // ========================================================================

    /// Replay one trace entry against this table.
    ///
    /// `lookahead` is the remaining future page sequence, consulted only by
    /// the optimal policy; every other policy ignores it and may receive an
    /// empty slice. `now` is the global step index.
    pub fn process(
        &mut self,
        page: PageId,
        op: AccessOp,
        now: u64,
        lookahead: &[PageId],
        owner: Option<ProcessId>,
    ) -> Outcome {
        self.total_accesses += 1;

        match self.lookup(page, owner) {
            Some(slot) => self.handle_hit(slot, op, now),
            None => self.handle_miss(page, op, now, lookahead, owner),
        }
    }

    /// The slot that would be evicted by the next full-table miss, without
    /// mutating reference bits, cursors, list membership, or counters.
    ///
    /// Returns `None` while any slot is still free (the next miss would not
    /// evict anything).
    pub fn predict_next_victim(&self, lookahead: &[PageId]) -> Option<usize> {
        if self.slots.iter().any(|slot| slot.is_none()) {
            return None;
        }
        Some(self.replacer.peek_victim(&self.slots, lookahead))
    }

    /// Per-slot display records. Pure derived data, no side effects.
    ///
    /// The dirty tag overrides the policy-specific tag so write-back
    /// candidates stand out.
    pub fn snapshot(&self, now: u64) -> Vec<Option<SlotView>> {
        let hand = self.replacer.hand();

        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.as_ref().map(|frame| SlotView {
                    page: frame.page,
                    owner: frame.owner,
                    tag: if frame.dirty {
                        "DIRTY".to_string()
                    } else {
                        self.replacer.slot_tag(frame, now)
                    },
                    is_hand: hand == Some(i),
                    dirty: frame.dirty,
                    active: frame.active,
                })
            })
            .collect()
    }

    // ========================================================================
    // Public API: stats and inspection
    // ========================================================================

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    pub fn miss_count(&self) -> u64 {
        self.miss_count
    }

    pub fn write_back_count(&self) -> u64 {
        self.write_back_count
    }

    /// Running miss rate in percent; 0 before any access.
    pub fn miss_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.miss_count as f64 / self.total_accesses as f64 * 100.0
        }
    }

    /// The raw slot arena, for tests and display layers.
    pub fn slots(&self) -> &[Option<Frame>] {
        &self.slots
    }

    // ========================================================================
    // Internal: hit / miss paths
    // ========================================================================

    fn lookup(&self, page: PageId, owner: Option<ProcessId>) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|f| f.matches(page, owner)))
    }

    fn handle_hit(&mut self, slot: usize, op: AccessOp, now: u64) -> Outcome {
        if let Some(frame) = self.slots[slot].as_mut() {
            frame.last_access = now;
        }

        // Policy-specific touch: clock sets the reference bit, two-list
        // promotes to the active list and rebalances.
        self.replacer.touch(&mut self.slots, slot);

        if op.is_write() {
            if let Some(frame) = self.slots[slot].as_mut() {
                frame.dirty = true;
            }
        }

        Outcome::hit()
    }

    fn handle_miss(
        &mut self,
        page: PageId,
        op: AccessOp,
        now: u64,
        lookahead: &[PageId],
        owner: Option<ProcessId>,
    ) -> Outcome {
        self.miss_count += 1;
        self.load_counter += 1;

        let incoming = Frame::load(page, owner, self.load_counter, now, op.is_write());

        let (target, evicted, write_back) = match self.first_free_slot() {
            // Free slot available: no eviction.
            Some(free) => (free, None, false),
            None => {
                let victim = self.replacer.select_victim(&mut self.slots, lookahead);
                let outgoing = self.slots[victim]
                    .take()
                    .unwrap_or_else(|| unreachable!("selected victim slot is empty"));

                let write_back = outgoing.dirty;
                if write_back {
                    self.write_back_count += 1;
                }

                trace!(
                    "{}: evict {} from slot {} for {}{}",
                    self.kind,
                    outgoing.page,
                    victim,
                    page,
                    if write_back { " (write-back)" } else { "" }
                );

                let evicted = EvictedPage {
                    page: outgoing.page,
                    owner: outgoing.owner,
                };
                (victim, Some(evicted), write_back)
            }
        };

        self.slots[target] = Some(incoming);
        self.replacer.placed(target, self.capacity);

        Outcome {
            status: AccessStatus::Miss,
            evicted,
            write_back,
        }
    }

    fn first_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }
}

/// Display record for one slot of a policy's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub page: PageId,
    pub owner: Option<ProcessId>,

    /// Policy-specific human-readable tag (load order, idle time,
    /// reference bit, ...), replaced by `"DIRTY"` for dirty frames.
    pub tag: String,

    /// Whether the clock hand currently points at this slot.
    pub is_hand: bool,

    pub dirty: bool,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::AccessOp;

    fn page(n: u64) -> PageId {
        PageId::new(n)
    }

    /// Replay reads of `pages` against a fresh table, one step per entry.
    fn run(kind: PolicyKind, capacity: usize, pages_seq: &[u64]) -> PolicyState {
        let mut state = PolicyState::new(kind, capacity);
        for (now, &p) in pages_seq.iter().enumerate() {
            let lookahead: Vec<PageId> = pages_seq[now + 1..].iter().map(|&x| page(x)).collect();
            state.process(page(p), AccessOp::Read, now as u64, &lookahead, None);
        }
        state
    }

    #[test]
    fn test_counters_track_accesses_and_misses() {
        let state = run(PolicyKind::Lru, 2, &[1, 2, 1, 3, 1]);
        assert_eq!(state.total_accesses(), 5);
        assert_eq!(state.miss_count(), 3); // 1, 2, 3
        assert!((state.miss_rate() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_miss_rate_zero_before_any_access() {
        let state = PolicyState::new(PolicyKind::Fifo, 2);
        assert_eq!(state.miss_rate(), 0.0);
    }

    #[test]
    fn test_free_slots_filled_before_eviction() {
        let mut state = PolicyState::new(PolicyKind::Fifo, 3);

        for (now, p) in [1u64, 2, 3].into_iter().enumerate() {
            let outcome = state.process(page(p), AccessOp::Read, now as u64, &[], None);
            assert_eq!(outcome.status, AccessStatus::Miss);
            assert_eq!(outcome.evicted, None, "free slot must be used, not eviction");
        }

        let outcome = state.process(page(4), AccessOp::Read, 3, &[], None);
        assert!(outcome.evicted.is_some());
    }

    #[test]
    fn test_loaded_at_strictly_increasing() {
        let state = run(PolicyKind::Fifo, 2, &[1, 2, 3, 4]);
        // Final residents are pages 3 and 4 with load numbers 3 and 4.
        let loads: Vec<u64> = state
            .slots()
            .iter()
            .filter_map(|s| s.as_ref().map(|f| f.loaded_at))
            .collect();
        assert_eq!(loads, vec![3, 4]);
    }

    #[test]
    fn test_hit_refreshes_last_access_only() {
        let mut state = PolicyState::new(PolicyKind::Lru, 2);
        state.process(page(1), AccessOp::Read, 0, &[], None);
        state.process(page(1), AccessOp::Read, 7, &[], None);

        let frame = state.slots()[0].as_ref().unwrap();
        assert_eq!(frame.last_access, 7);
        assert_eq!(state.miss_count(), 1);
        assert_eq!(state.total_accesses(), 2);
    }

    #[test]
    fn test_write_marks_dirty_on_hit_and_load() {
        let mut state = PolicyState::new(PolicyKind::Lru, 2);

        state.process(page(1), AccessOp::Write, 0, &[], None);
        assert!(state.slots()[0].as_ref().unwrap().dirty);

        state.process(page(2), AccessOp::Read, 1, &[], None);
        assert!(!state.slots()[1].as_ref().unwrap().dirty);

        state.process(page(2), AccessOp::Write, 2, &[], None);
        assert!(state.slots()[1].as_ref().unwrap().dirty);
    }

    #[test]
    fn test_write_back_counted_exactly_on_dirty_eviction() {
        let mut state = PolicyState::new(PolicyKind::Fifo, 1);

        state.process(page(1), AccessOp::Write, 0, &[], None);
        let outcome = state.process(page(2), AccessOp::Read, 1, &[], None);
        assert!(outcome.write_back);
        assert_eq!(state.write_back_count(), 1);

        // Page 2 was loaded clean; its eviction writes nothing back.
        let outcome = state.process(page(3), AccessOp::Read, 2, &[], None);
        assert!(!outcome.write_back);
        assert_eq!(state.write_back_count(), 1);
    }

    #[test]
    fn test_eviction_reports_outgoing_page() {
        let mut state = PolicyState::new(PolicyKind::Fifo, 2);
        state.process(page(1), AccessOp::Read, 0, &[], None);
        state.process(page(2), AccessOp::Read, 1, &[], None);

        let outcome = state.process(page(3), AccessOp::Read, 2, &[], None);
        assert_eq!(
            outcome.evicted,
            Some(EvictedPage {
                page: page(1),
                owner: None
            })
        );
    }

    #[test]
    fn test_multi_process_same_page_distinct_frames() {
        let p0 = Some(ProcessId::new(0));
        let p1 = Some(ProcessId::new(1));
        let mut state = PolicyState::new(PolicyKind::Lru, 2);

        state.process(page(2), AccessOp::Read, 0, &[], p0);
        // Same page number, different owner: a separate frame, not a hit.
        let outcome = state.process(page(2), AccessOp::Read, 1, &[], p1);
        assert_eq!(outcome.status, AccessStatus::Miss);
        assert_eq!(state.miss_count(), 2);

        // Each process now hits only its own frame.
        assert!(state.process(page(2), AccessOp::Read, 2, &[], p0).is_hit());
        assert!(state.process(page(2), AccessOp::Read, 3, &[], p1).is_hit());
    }

    #[test]
    fn test_evicting_one_owners_page_spares_the_other() {
        let p0 = Some(ProcessId::new(0));
        let p1 = Some(ProcessId::new(1));
        let mut state = PolicyState::new(PolicyKind::Lru, 2);

        state.process(page(2), AccessOp::Read, 0, &[], p0);
        state.process(page(2), AccessOp::Read, 1, &[], p1);

        // Evicts P0's copy (least recently used).
        let outcome = state.process(page(5), AccessOp::Read, 2, &[], p0);
        assert_eq!(
            outcome.evicted,
            Some(EvictedPage {
                page: page(2),
                owner: p0
            })
        );

        // P1's copy must still be resident.
        assert!(state.process(page(2), AccessOp::Read, 3, &[], p1).is_hit());
    }

    #[test]
    fn test_predict_none_while_free_slots_remain() {
        let mut state = PolicyState::new(PolicyKind::Lru, 2);
        assert_eq!(state.predict_next_victim(&[]), None);

        state.process(page(1), AccessOp::Read, 0, &[], None);
        assert_eq!(state.predict_next_victim(&[]), None);

        state.process(page(2), AccessOp::Read, 1, &[], None);
        assert_eq!(state.predict_next_victim(&[]), Some(0));
    }

    #[test]
    fn test_predict_does_not_disturb_clock_state() {
        let mut state = PolicyState::new(PolicyKind::Clock, 3);
        for (now, p) in [1u64, 2, 3].into_iter().enumerate() {
            state.process(page(p), AccessOp::Read, now as u64, &[], None);
        }

        let before: Vec<Option<Frame>> = state.slots().to_vec();
        let first = state.predict_next_victim(&[]);
        let second = state.predict_next_victim(&[]);

        assert_eq!(first, second);
        assert_eq!(state.slots(), &before[..]);
    }

    #[test]
    fn test_snapshot_tags_and_dirty_override() {
        let mut state = PolicyState::new(PolicyKind::Fifo, 3);
        state.process(page(1), AccessOp::Read, 0, &[], None);
        state.process(page(2), AccessOp::Write, 1, &[], None);

        let snapshot = state.snapshot(2);
        assert_eq!(snapshot[0].as_ref().unwrap().tag, "SEQ:1");
        assert_eq!(snapshot[1].as_ref().unwrap().tag, "DIRTY");
        assert!(snapshot[1].as_ref().unwrap().dirty);
        assert_eq!(snapshot[2], None);
    }

    #[test]
    fn test_snapshot_marks_clock_hand() {
        let mut state = PolicyState::new(PolicyKind::Clock, 3);
        state.process(page(1), AccessOp::Read, 0, &[], None);

        // Placement advanced the hand to slot 1.
        let snapshot = state.snapshot(1);
        assert!(!snapshot[0].as_ref().unwrap().is_hand);
        let hand_flags: Vec<bool> = snapshot
            .iter()
            .map(|s| s.as_ref().map(|v| v.is_hand).unwrap_or(false))
            .collect();
        assert_eq!(hand_flags, vec![false, false, false]); // slot 1 is empty
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut state = run(PolicyKind::Clock, 2, &[1, 2, 3, 1]);
        assert!(state.total_accesses() > 0);

        state.reset();
        assert_eq!(state.total_accesses(), 0);
        assert_eq!(state.miss_count(), 0);
        assert_eq!(state.write_back_count(), 0);
        assert!(state.slots().iter().all(|s| s.is_none()));
    }

    #[test]
    fn test_optimal_uses_lookahead() {
        let mut state = PolicyState::new(PolicyKind::Optimal, 2);
        state.process(page(1), AccessOp::Read, 0, &[], None);
        state.process(page(2), AccessOp::Read, 1, &[], None);

        // Page 1 is needed sooner; page 2 must go.
        let lookahead = [page(1), page(1), page(2)];
        let outcome = state.process(page(3), AccessOp::Read, 2, &lookahead, None);
        assert_eq!(outcome.evicted.unwrap().page, page(2));
    }
}
