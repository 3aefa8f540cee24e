//! Optimal (offline lookahead) replacement policy.
//!
//! Belady's MIN: evict the page whose next reference lies furthest in the
//! future. Requires the full remaining trace, so it is only realizable in a
//! simulator — it serves as the lower bound the online policies are
//! measured against.

use crate::common::PageId;
use crate::policy::replacer::{occupied, Replacer};
use crate::policy::Frame;

/// Distance assigned to a page never referenced again.
///
/// Larger than any real lookahead index, so "never used again" always loses
/// to pages with a real future reference.
const NEVER_AGAIN: usize = usize::MAX;

/// Offline-optimal eviction.
#[derive(Debug, Default)]
pub struct Optimal;

impl Optimal {
    /// Slot whose page is referenced furthest in the future.
    ///
    /// Lookahead distance matches on page number alone; in multi-process
    /// traces the future sequence is not owner-qualified. The first slot
    /// wins among equal distances.
    fn furthest_use(slots: &[Option<Frame>], lookahead: &[PageId]) -> usize {
        let mut victim: Option<(usize, usize)> = None;

        for (i, frame) in occupied(slots) {
            let dist = lookahead
                .iter()
                .position(|&p| p == frame.page)
                .unwrap_or(NEVER_AGAIN);

            match victim {
                Some((_, best)) if dist <= best => {}
                _ => victim = Some((i, dist)),
            }
        }

        victim
            .map(|(i, _)| i)
            .unwrap_or_else(|| unreachable!("victim selection on a table with no occupied slot"))
    }
}

impl Replacer for Optimal {
    fn select_victim(&mut self, slots: &mut [Option<Frame>], lookahead: &[PageId]) -> usize {
        Self::furthest_use(slots, lookahead)
    }

    fn peek_victim(&self, slots: &[Option<Frame>], lookahead: &[PageId]) -> usize {
        Self::furthest_use(slots, lookahead)
    }

    fn slot_tag(&self, _frame: &Frame, _now: u64) -> String {
        "OPT".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::replacer::test_util::table;

    fn pages(ids: &[u64]) -> Vec<PageId> {
        ids.iter().copied().map(PageId::new).collect()
    }

    #[test]
    fn test_optimal_evicts_furthest_future_use() {
        let mut slots = table(&[(1, 1, 0), (2, 2, 0), (3, 3, 0)]);
        let mut opt = Optimal;

        // Next uses: page 2 at 0, page 3 at 1, page 1 at 2.
        assert_eq!(opt.select_victim(&mut slots, &pages(&[2, 3, 1])), 0);
    }

    #[test]
    fn test_optimal_prefers_page_never_used_again() {
        let mut slots = table(&[(1, 1, 0), (2, 2, 0), (3, 3, 0)]);
        let mut opt = Optimal;

        // Page 2 never reappears.
        assert_eq!(opt.select_victim(&mut slots, &pages(&[3, 1, 3, 1])), 1);
    }

    #[test]
    fn test_optimal_tie_breaks_to_lowest_slot() {
        let mut slots = table(&[(1, 1, 0), (2, 2, 0)]);
        let mut opt = Optimal;

        // Neither page reappears; both distances are the sentinel.
        assert_eq!(opt.select_victim(&mut slots, &pages(&[9, 8])), 0);
    }

    #[test]
    fn test_optimal_empty_lookahead_evicts_first_slot() {
        let mut slots = table(&[(1, 1, 0), (2, 2, 0), (3, 3, 0)]);
        let mut opt = Optimal;

        assert_eq!(opt.select_victim(&mut slots, &[]), 0);
    }

    #[test]
    fn test_optimal_peek_matches_select() {
        let mut slots = table(&[(4, 1, 0), (5, 2, 0), (6, 3, 0)]);
        let lookahead = pages(&[5, 6, 4, 5]);
        let opt = Optimal;

        let peeked = opt.peek_victim(&slots, &lookahead);
        let mut opt = Optimal;
        assert_eq!(opt.select_victim(&mut slots, &lookahead), peeked);
    }
}
