//! Synthetic access-trace generation.
//!
//! The generator produces locality-biased random traces (a hot working set
//! absorbing most accesses, a mostly-read cold region for the rest), either
//! for a single process or for several processes interleaved in round-robin
//! time slices. A fixed adversarial fixture reproducing Belady's anomaly is
//! also provided.

use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{PageId, ProcessId, SimConfig};

/// The 12-page reference string exhibiting Belady's anomaly.
///
/// Replayed against FIFO, 3 frames produce 9 misses but 4 frames produce
/// 10: adding memory makes FIFO worse. Used to validate FIFO's
/// non-monotonicity, not the other policies.
pub const BELADY_PAGES: [u64; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

/// Whether an access reads or writes its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOp {
    Read,
    Write,
}

impl AccessOp {
    #[inline]
    pub fn is_write(&self) -> bool {
        matches!(self, AccessOp::Write)
    }
}

impl fmt::Display for AccessOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOp::Read => f.write_str("R"),
            AccessOp::Write => f.write_str("W"),
        }
    }
}

/// One instruction of the access trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Raw virtual address.
    pub address: u64,

    pub op: AccessOp,

    /// Issuing process; `None` in single-process traces.
    pub owner: Option<ProcessId>,
}

impl TraceEntry {
    /// The page this entry touches under the given page size.
    #[inline]
    pub fn page(&self, page_size: u64) -> PageId {
        PageId::from_address(self.address, page_size)
    }
}

/// Per-process metadata for multi-process traces.
///
/// Consumed only by the generator; policy logic never looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    pub id: ProcessId,
    pub name: String,

    /// This process's hot working-set address range.
    pub hot_range: std::ops::Range<u64>,

    /// This process's cold address range.
    pub cold_range: std::ops::Range<u64>,
}

impl ProcessInfo {
    /// Registry for `count` processes sharing the configured locality
    /// ranges.
    pub fn registry(config: &SimConfig, count: usize) -> Vec<ProcessInfo> {
        (0..count)
            .map(|i| {
                let id = ProcessId::new(i as u32);
                ProcessInfo {
                    id,
                    name: id.to_string(),
                    hot_range: config.hot_range.clone(),
                    cold_range: config.cold_range.clone(),
                }
            })
            .collect()
    }
}

/// Produces the synthetic access sequences.
///
/// Owns its RNG so a seeded generator replays the same traces in order,
/// which is what the deterministic tests rely on.
#[derive(Debug)]
pub struct TraceGenerator {
    config: SimConfig,
    rng: StdRng,
}

impl TraceGenerator {
    /// Generator with an entropy-seeded RNG.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed, for reproducible traces.
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// A single-process trace of the configured length.
    pub fn generate_single(&mut self) -> Vec<TraceEntry> {
        let hot = self.config.hot_range.clone();
        let cold = self.config.cold_range.clone();
        let len = self.config.trace_len;
        let trace = self.sequence(hot, cold, len, None);

        debug!("generated single-process trace of {} instructions", trace.len());
        trace
    }

    /// A multi-process trace: one sub-sequence per process, interleaved in
    /// round-robin bursts of `burst_size` until the longest sub-sequence is
    /// exhausted.
    pub fn generate_multi(&mut self, processes: &[ProcessInfo]) -> Vec<TraceEntry> {
        let len = self.config.process_len(processes.len());

        let sequences: Vec<Vec<TraceEntry>> = processes
            .iter()
            .map(|p| {
                self.sequence(
                    p.hot_range.clone(),
                    p.cold_range.clone(),
                    len,
                    Some(p.id),
                )
            })
            .collect();

        let trace = self.interleave(&sequences);
        debug!(
            "generated multi-process trace: {} processes, {} instructions",
            processes.len(),
            trace.len()
        );
        trace
    }

    /// Locality-biased random sequence for one execution context.
    ///
    /// Hot accesses are a mixed read/write working set; cold accesses model
    /// sequential-ish traffic and are almost all reads.
    fn sequence(
        &mut self,
        hot: std::ops::Range<u64>,
        cold: std::ops::Range<u64>,
        len: usize,
        owner: Option<ProcessId>,
    ) -> Vec<TraceEntry> {
        (0..len)
            .map(|_| {
                let (address, write_prob) = if self.rng.gen_bool(self.config.hot_prob) {
                    (self.rng.gen_range(hot.clone()), self.config.hot_write_prob)
                } else {
                    (self.rng.gen_range(cold.clone()), self.config.cold_write_prob)
                };

                let op = if self.rng.gen_bool(write_prob) {
                    AccessOp::Write
                } else {
                    AccessOp::Read
                };

                TraceEntry { address, op, owner }
            })
            .collect()
    }

    /// Time-slice scheduling: each process runs `burst_size` instructions,
    /// then the next process gets the CPU, round-robin, until every
    /// sub-sequence is drained.
    fn interleave(&self, sequences: &[Vec<TraceEntry>]) -> Vec<TraceEntry> {
        let burst = self.config.burst_size.max(1);
        let longest = sequences.iter().map(Vec::len).max().unwrap_or(0);

        let mut combined = Vec::with_capacity(sequences.iter().map(Vec::len).sum());
        let mut cycle = 0;
        while cycle < longest {
            for sequence in sequences {
                let end = (cycle + burst).min(sequence.len());
                if cycle < sequence.len() {
                    combined.extend_from_slice(&sequence[cycle..end]);
                }
            }
            cycle += burst;
        }
        combined
    }
}

/// The Belady fixture as a replayable trace: reads, no owner, addresses at
/// page granularity.
pub fn belady_trace(page_size: u64) -> Vec<TraceEntry> {
    BELADY_PAGES
        .iter()
        .map(|&page| TraceEntry {
            address: page * page_size,
            op: AccessOp::Read,
            owner: None,
        })
        .collect()
}
