//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Flow
//! - `BroadcastPlan` is the config loader's output and the pipeline's input
//! - `ShardRecord` values are read from the shared store, never written
//! - `AggregateStats` is computed once per run and shared read-only by all
//!   dispatch tasks

mod error;
mod outcome;
mod plan;
mod record;
mod source;
mod stats;
pub mod template;

pub use error::*;
pub use outcome::*;
pub use plan::*;
pub use record::ShardRecord;
pub use source::*;
pub use stats::AggregateStats;
