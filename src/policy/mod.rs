//! Eviction policies and their frame tables.
//!
//! # Components
//! - [`Frame`] - one occupied slot's state
//! - [`PolicyState`] - one policy's fixed-capacity frame table + counters
//! - [`replacer`] - the five eviction disciplines behind one trait
//! - [`Outcome`] / [`SlotView`] - per-access result and display snapshot

mod frame;
pub mod replacer;
mod table;

pub use frame::Frame;
pub use table::{PolicyState, SlotView};

use std::fmt;

use crate::common::{PageId, ProcessId};

/// The eviction disciplines competing in a simulation.
///
/// All five run in lockstep over the same trace; [`ALL`](Self::ALL) fixes
/// the stable stepping and reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    /// Evict the oldest load.
    Fifo,
    /// Evict the least recently used frame.
    Lru,
    /// Offline lookahead: evict the page used furthest in the future.
    Optimal,
    /// Second-chance reference-bit approximation of LRU.
    Clock,
    /// Active/inactive list approximation of LRU.
    TwoList,
}

impl PolicyKind {
    /// Every policy, in stable stepping order.
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Optimal,
        PolicyKind::Clock,
        PolicyKind::TwoList,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Optimal => "OPT",
            PolicyKind::Clock => "CLOCK",
            PolicyKind::TwoList => "TWO_LIST",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an access found its page resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    Hit,
    Miss,
}

/// The page displaced by an eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictedPage {
    pub page: PageId,
    pub owner: Option<ProcessId>,
}

/// Result of processing one access against one policy's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: AccessStatus,

    /// The displaced page, when the miss forced an eviction. `None` on hits
    /// and on misses that filled a free slot.
    pub evicted: Option<EvictedPage>,

    /// Whether the displaced frame was dirty and had to be written back.
    pub write_back: bool,
}

impl Outcome {
    /// The outcome of a hit: nothing displaced, nothing written back.
    pub fn hit() -> Self {
        Self {
            status: AccessStatus::Hit,
            evicted: None,
            write_back: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.status == AccessStatus::Hit
    }
}
