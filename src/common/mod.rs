//! Common types and utilities shared across pagesim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Simulation configuration
//! - Error types
//! - Identifiers (PageId, ProcessId)

pub mod config;
pub mod error;
mod page_id;
mod process_id;

pub use config::{SimConfig, PAGE_SIZE};
pub use error::{Error, Result};
pub use page_id::PageId;
pub use process_id::ProcessId;
