//! Error types for pagesim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// The engine is a closed deterministic computation, so the taxonomy is
/// narrow: only degenerate configuration is rejected, and only at
/// construction. An exhausted trace is a normal terminal outcome (`step()`
/// returns `None`), not an error. Internal invariant violations (a victim
/// rule running against a table with no occupied slot) panic instead of
/// returning an error, since a silent fallback would mask a logic bug in
/// victim selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Frame-table capacity must be at least one slot.
    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Multi-process mode needs at least one process.
    #[error("process count must be at least 1, got {0}")]
    InvalidProcessCount(usize),
}
