//! Simulation configuration.
//!
//! The locality parameters (hot/cold ranges, access probabilities, burst
//! size) varied across iterations of the workloads this simulator models,
//! so they are tunable per run rather than compile-time constants.

use std::ops::Range;

/// Default page size: one page per 10 address units.
///
/// Small on purpose. With addresses drawn from [0, 600) this yields 60
/// distinct pages, enough to exercise every policy against a handful of
/// frames while keeping snapshots readable.
pub const PAGE_SIZE: u64 = 10;

/// Tunable parameters for trace generation.
///
/// The defaults model a program with strong locality: 95% of accesses land
/// in a small hot working set where reads and writes are evenly mixed, the
/// rest in a large cold region that is almost read-only.
///
/// # Example
/// ```
/// use pagesim::SimConfig;
///
/// let config = SimConfig {
///     trace_len: 500,
///     ..SimConfig::default()
/// };
/// assert_eq!(config.hot_range, 0..40);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Address units per page.
    pub page_size: u64,

    /// Number of instructions in a single-process trace, and the total
    /// budget split across processes in multi-process mode.
    pub trace_len: usize,

    /// Address range of the hot working set.
    pub hot_range: Range<u64>,

    /// Address range of the cold region, disjoint from `hot_range`.
    pub cold_range: Range<u64>,

    /// Probability that an access targets the hot range.
    pub hot_prob: f64,

    /// Probability that a hot access is a write.
    pub hot_write_prob: f64,

    /// Probability that a cold access is a write.
    pub cold_write_prob: f64,

    /// Instructions a process runs before the scheduler switches to the
    /// next one (multi-process interleaving).
    pub burst_size: usize,

    /// Minimum sub-sequence length per process in multi-process mode.
    pub min_process_len: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            trace_len: 2000,
            hot_range: 0..40,
            cold_range: 400..600,
            hot_prob: 0.95,
            hot_write_prob: 0.5,
            cold_write_prob: 0.1,
            burst_size: 10,
            min_process_len: 800,
        }
    }
}

impl SimConfig {
    /// Sub-sequence length for one process when the trace budget is split
    /// across `process_count` processes.
    pub fn process_len(&self, process_count: usize) -> usize {
        self.min_process_len.max(self.trace_len / process_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges_are_disjoint() {
        let config = SimConfig::default();
        assert!(config.hot_range.end <= config.cold_range.start);
    }

    #[test]
    fn test_default_probabilities_in_unit_interval() {
        let config = SimConfig::default();
        for p in [config.hot_prob, config.hot_write_prob, config.cold_write_prob] {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_process_len_honors_minimum() {
        let config = SimConfig::default();
        // 2000 / 4 = 500, below the 800 floor
        assert_eq!(config.process_len(4), 800);
        // 2000 / 2 = 1000, above the floor
        assert_eq!(config.process_len(2), 1000);
    }
}
