//! Clock (second-chance) replacement policy.
//!
//! Approximates LRU with a single reference bit per frame and a circular
//! hand. A frame touched since the hand last passed gets a second chance:
//! its bit is cleared and the hand moves on. The first frame found with a
//! clear bit is the victim.

use crate::common::PageId;
use crate::policy::replacer::Replacer;
use crate::policy::Frame;

/// Second-chance eviction with a persistent hand.
#[derive(Debug, Default)]
pub struct Clock {
    /// Current hand position. Survives across steps; advances past every
    /// placement.
    hand: usize,
}

impl Clock {
    pub fn new() -> Self {
        Self { hand: 0 }
    }

    /// Collect the reference bits of a fully occupied table.
    fn ref_bits(slots: &[Option<Frame>]) -> Vec<bool> {
        slots
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .unwrap_or_else(|| unreachable!("clock sweep over a table with an empty slot"))
                    .ref_bit
            })
            .collect()
    }
}

/// Run the second-chance sweep over a table's reference bits.
///
/// Set bits are cleared in place and skipped; the first clear bit is the
/// victim. The scan is bounded to `2 * capacity + 1` probes so it
/// terminates even with every bit set (after one full clearing rotation the
/// second pass must find a cleared bit); if somehow exhausted, it falls
/// back to wherever the hand stopped.
///
/// This one routine backs both eviction and prediction: eviction commits
/// the cleared bits back to the frames, prediction runs it on a scratch
/// copy. Keeping a single sweep avoids the two paths drifting apart.
fn sweep(ref_bits: &mut [bool], start: usize) -> usize {
    let capacity = ref_bits.len();
    let mut hand = start;

    for _ in 0..(2 * capacity + 1) {
        if ref_bits[hand] {
            ref_bits[hand] = false;
            hand = (hand + 1) % capacity;
        } else {
            return hand;
        }
    }

    hand
}

impl Replacer for Clock {
    fn touch(&mut self, slots: &mut [Option<Frame>], slot: usize) {
        if let Some(frame) = slots[slot].as_mut() {
            frame.ref_bit = true;
        }
    }

    fn placed(&mut self, slot: usize, capacity: usize) {
        self.hand = (slot + 1) % capacity;
    }

    fn select_victim(&mut self, slots: &mut [Option<Frame>], _lookahead: &[PageId]) -> usize {
        let mut bits = Self::ref_bits(slots);
        let victim = sweep(&mut bits, self.hand);

        // Commit the second chances handed out during the scan.
        for (slot, bit) in slots.iter_mut().zip(bits) {
            if let Some(frame) = slot.as_mut() {
                frame.ref_bit = bit;
            }
        }

        self.hand = (victim + 1) % slots.len();
        victim
    }

    fn peek_victim(&self, slots: &[Option<Frame>], _lookahead: &[PageId]) -> usize {
        let mut bits = Self::ref_bits(slots);
        sweep(&mut bits, self.hand)
    }

    fn slot_tag(&self, frame: &Frame, _now: u64) -> String {
        format!("REF:{}", u8::from(frame.ref_bit))
    }

    fn hand(&self) -> Option<usize> {
        Some(self.hand)
    }
}
