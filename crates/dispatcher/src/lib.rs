//! # Dispatcher
//!
//! Request fan-out module.
//!
//! Responsible for:
//! - Building one fully-formed request per destination
//! - Concurrent fan-out with a fan-in barrier over all destinations
//! - Isolating per-destination outcomes, so no single failure aborts the
//!   batch

pub mod dispatcher;
pub mod error;
pub mod request;

pub use contracts::{DispatchOutcome, DispatchStatus};
pub use dispatcher::Dispatcher;
pub use error::DispatcherError;
pub use request::{prepare, PreparedRequest};
