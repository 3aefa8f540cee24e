//! Process identifier type.

use std::fmt;

/// Identifies a simulated process.
///
/// Only meaningful in multi-process mode, where the access trace tags every
/// entry with the process that issued it and frames are owned per process.
/// Single-process traffic carries no owner (`Option<ProcessId>` is `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Create a new ProcessId.
    #[inline]
    pub fn new(id: u32) -> Self {
        ProcessId(id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
