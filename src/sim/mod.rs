//! Simulator - the trace scheduler and lockstep policy driver.
//!
//! The [`Simulator`] owns one generated trace and one [`PolicyState`] per
//! eviction discipline. Each [`step`](Simulator::step) replays the next
//! trace entry against every policy simultaneously and returns a
//! [`StepReport`] bundling the per-policy outcomes with a detailed
//! snapshot of the currently viewed policy. A display layer drives `step()`
//! repeatedly and renders the reports; it never mutates policy state
//! directly.

use log::debug;

use crate::common::{Error, PageId, ProcessId, Result, SimConfig};
use crate::policy::{AccessStatus, EvictedPage, PolicyKind, PolicyState, SlotView};
use crate::trace::{belady_trace, AccessOp, ProcessInfo, TraceEntry, TraceGenerator};

/// How the trace is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimMode {
    /// One execution context, no owners on trace entries.
    Single,
    /// Several processes with interleaved time slices; frames are owned.
    Multi,
}

/// One policy's share of a step report.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyResult {
    pub kind: PolicyKind,
    pub status: AccessStatus,
    pub evicted: Option<EvictedPage>,
    pub write_back: bool,

    /// Running miss rate in percent.
    pub miss_rate: f64,
    pub miss_count: u64,
    pub write_back_count: u64,
}

/// Everything a display layer needs about one completed step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// The replayed instruction.
    pub address: u64,
    pub op: AccessOp,
    pub owner: Option<ProcessId>,
    pub page: PageId,

    /// Per-policy outcomes in [`PolicyKind::ALL`] order.
    pub results: Vec<PolicyResult>,

    /// Which policy `memory` and `next_victim` describe.
    pub viewed: PolicyKind,

    /// The viewed policy's full slot snapshot after this step.
    pub memory: Vec<Option<SlotView>>,

    /// Slot the viewed policy would evict next; `None` while it still has
    /// free slots.
    pub next_victim: Option<usize>,

    /// Global step count after this step.
    pub step: u64,
}

impl StepReport {
    /// This step's result for one policy.
    pub fn result(&self, kind: PolicyKind) -> Option<&PolicyResult> {
        self.results.iter().find(|r| r.kind == kind)
    }
}

/// A page-replacement simulation session.
///
/// The trace is generated eagerly at construction and is immutable until
/// [`reset`](Self::reset) or [`load_fixed_sequence`](Self::load_fixed_sequence)
/// replaces it wholesale. Execution is single-threaded and synchronous:
/// `step()` fully processes one trace entry across all policies before
/// returning, so every policy has always consumed an identical trace
/// prefix. Changing capacity or process count means building a new
/// `Simulator`.
#[derive(Debug)]
pub struct Simulator {
    capacity: usize,
    mode: SimMode,

    /// Whether the Belady fixture replaced the generated trace.
    fixed: bool,

    generator: TraceGenerator,
    trace: Vec<TraceEntry>,

    /// Index of the next unconsumed instruction.
    cursor: usize,

    /// One table per policy, in [`PolicyKind::ALL`] order.
    policies: Vec<PolicyState>,

    viewed: PolicyKind,

    /// Multi-process registry; empty in single mode. Only the generator
    /// reads it.
    processes: Vec<ProcessInfo>,
}

impl Simulator {
    /// Create a session with default configuration and an entropy seed.
    ///
    /// `process_count` is ignored (treated as 1) unless `mode` is
    /// [`SimMode::Multi`].
    ///
    /// # Errors
    /// - [`Error::InvalidCapacity`] if `capacity` is 0
    /// - [`Error::InvalidProcessCount`] if multi mode is given 0 processes
    pub fn new(capacity: usize, mode: SimMode, process_count: usize) -> Result<Self> {
        Self::with_config(capacity, mode, process_count, SimConfig::default(), None)
    }

    /// Create a session with explicit configuration and an optional RNG
    /// seed. Seeded sessions generate identical traces run after run.
    pub fn with_config(
        capacity: usize,
        mode: SimMode,
        process_count: usize,
        config: SimConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        if capacity < 1 {
            return Err(Error::InvalidCapacity(capacity));
        }

        let process_count = match mode {
            SimMode::Multi if process_count < 1 => {
                return Err(Error::InvalidProcessCount(process_count))
            }
            SimMode::Multi => process_count,
            SimMode::Single => 1,
        };

        let generator = match seed {
            Some(seed) => TraceGenerator::with_seed(config, seed),
            None => TraceGenerator::new(config),
        };

        let processes = match mode {
            SimMode::Multi => ProcessInfo::registry(generator.config(), process_count),
            SimMode::Single => Vec::new(),
        };

        let policies = PolicyKind::ALL
            .iter()
            .map(|&kind| PolicyState::new(kind, capacity))
            .collect();

        let mut sim = Self {
            capacity,
            mode,
            fixed: false,
            generator,
            trace: Vec::new(),
            cursor: 0,
            policies,
            viewed: PolicyKind::Fifo,
            processes,
        };
        sim.trace = sim.generate_trace();

        debug!(
            "simulator ready: capacity {}, {:?} mode, {} trace entries",
            capacity,
            mode,
            sim.trace.len()
        );
        Ok(sim)
    }

    // ========================================================================
    // Public API: driving the simulation
    // ========================================================================

    /// Replay the next trace entry against every policy.
    ///
    /// Returns `None` once the trace is exhausted; that is the normal
    /// terminal outcome, and further calls keep returning `None`.
    pub fn step(&mut self) -> Option<StepReport> {
        if self.cursor >= self.trace.len() {
            return None;
        }

        let entry = self.trace[self.cursor];
        let page_size = self.generator.config().page_size;
        let page = entry.page(page_size);
        let now = self.cursor as u64;

        // The lookahead suffix is only materialized for the optimal
        // policy; everyone else gets an empty slice.
        let lookahead = if self.policies.iter().any(|p| p.kind() == PolicyKind::Optimal) {
            self.page_suffix(self.cursor + 1)
        } else {
            Vec::new()
        };

        let mut results = Vec::with_capacity(self.policies.len());
        for state in &mut self.policies {
            let future: &[PageId] = if state.kind() == PolicyKind::Optimal {
                &lookahead
            } else {
                &[]
            };

            let outcome = state.process(page, entry.op, now, future, entry.owner);
            results.push(PolicyResult {
                kind: state.kind(),
                status: outcome.status,
                evicted: outcome.evicted,
                write_back: outcome.write_back,
                miss_rate: state.miss_rate(),
                miss_count: state.miss_count(),
                write_back_count: state.write_back_count(),
            });
        }

        self.cursor += 1;

        // Snapshot and prediction for the viewed policy, against the
        // suffix that remains after this step.
        let prediction_lookahead = if self.viewed == PolicyKind::Optimal {
            self.page_suffix(self.cursor)
        } else {
            Vec::new()
        };
        let viewed_state = self.policy(self.viewed);
        let next_victim = viewed_state.predict_next_victim(&prediction_lookahead);
        let memory = viewed_state.snapshot(self.cursor as u64);

        Some(StepReport {
            address: entry.address,
            op: entry.op,
            owner: entry.owner,
            page,
            results,
            viewed: self.viewed,
            memory,
            next_victim,
            step: self.cursor as u64,
        })
    }

    /// Switch to the Belady fixture and reset all policy state.
    pub fn load_fixed_sequence(&mut self) {
        self.fixed = true;
        self.restart();
        debug!("loaded Belady fixture ({} entries)", self.trace.len());
    }

    /// Regenerate the trace (random mode) or reload the fixture (fixed
    /// mode) and reinitialize every policy to empty.
    pub fn reset(&mut self) {
        self.restart();
        debug!("simulator reset; trace length {}", self.trace.len());
    }

    /// Select which policy's snapshot and prediction `step()` reports.
    /// Pure selection; no policy state changes.
    pub fn set_viewed_policy(&mut self, kind: PolicyKind) {
        self.viewed = kind;
    }

    // ========================================================================
    // Public API: inspection
    // ========================================================================

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mode(&self) -> SimMode {
        self.mode
    }

    pub fn viewed_policy(&self) -> PolicyKind {
        self.viewed
    }

    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }

    /// Steps consumed so far.
    pub fn current_step(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.trace.len()
    }

    /// The process registry (empty in single mode).
    pub fn processes(&self) -> &[ProcessInfo] {
        &self.processes
    }

    /// One policy's table, for tests and display layers.
    pub fn policy(&self, kind: PolicyKind) -> &PolicyState {
        self.policies
            .iter()
            .find(|p| p.kind() == kind)
            .unwrap_or_else(|| unreachable!("all policies are constructed up front"))
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn restart(&mut self) {
        self.cursor = 0;
        self.trace = self.generate_trace();
        for policy in &mut self.policies {
            policy.reset();
        }
    }

    fn generate_trace(&mut self) -> Vec<TraceEntry> {
        if self.fixed {
            return belady_trace(self.generator.config().page_size);
        }
        match self.mode {
            SimMode::Single => self.generator.generate_single(),
            SimMode::Multi => self.generator.generate_multi(&self.processes),
        }
    }

    /// Page numbers of the trace suffix starting at `from`.
    fn page_suffix(&self, from: usize) -> Vec<PageId> {
        let page_size = self.generator.config().page_size;
        self.trace[from.min(self.trace.len())..]
            .iter()
            .map(|entry| entry.page(page_size))
            .collect()
    }
}
