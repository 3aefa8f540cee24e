//! pagesim - a virtual-memory page replacement simulator.
//!
//! A synthetic, locality-biased memory-access trace is replayed against
//! five competing eviction policies running in lockstep over independent
//! fixed-capacity frame tables, producing per-step hit/miss outcomes,
//! write-back accounting, and a predicted future victim for display.
//!
//! # Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Simulator                          │
//! │  ┌──────────────────┐      ┌─────────────────────────────┐ │
//! │  │  TraceGenerator  │ ───▶ │  trace: Vec<TraceEntry>     │ │
//! │  │  (hot/cold bias, │      │  (immutable once generated) │ │
//! │  │   time slices)   │      └──────────────┬──────────────┘ │
//! │  └──────────────────┘            step()   │ one entry      │
//! │                                           ▼                │
//! │  ┌───────────────────────────────────────────────────────┐ │
//! │  │  PolicyState per policy (lockstep, same capacity)     │ │
//! │  │   FIFO │ LRU │ OPT │ CLOCK │ TWO_LIST                 │ │
//! │  │   slots: Vec<Option<Frame>> + counters + Replacer     │ │
//! │  └───────────────────────────┬───────────────────────────┘ │
//! │                              ▼                             │
//! │            StepReport (outcomes, snapshot, prediction)     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, ProcessId, SimConfig, Error)
//! - [`policy`] - Frame tables and the five eviction disciplines
//! - [`trace`] - Synthetic trace generation and the Belady fixture
//! - [`sim`] - The lockstep simulator and its step reports
//!
//! # Quick Start
//! ```
//! use pagesim::{PolicyKind, SimMode, Simulator};
//!
//! let mut sim = Simulator::new(4, SimMode::Single, 1).unwrap();
//! sim.set_viewed_policy(PolicyKind::Lru);
//!
//! while let Some(report) = sim.step() {
//!     let lru = report.result(PolicyKind::Lru).unwrap();
//!     let _ = (lru.status, lru.miss_rate, &report.memory);
//! }
//! ```

pub mod common;
pub mod policy;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Error, PageId, ProcessId, Result, SimConfig};

pub use policy::{AccessStatus, EvictedPage, Frame, Outcome, PolicyKind, PolicyState, SlotView};
pub use sim::{PolicyResult, SimMode, Simulator, StepReport};
pub use trace::{belady_trace, AccessOp, ProcessInfo, TraceEntry, TraceGenerator, BELADY_PAGES};
