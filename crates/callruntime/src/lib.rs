//! Single-node execution runtime
//!
//! This crate provides the machinery that runs one node to completion or
//! final failure: the action registry, the bounded-backoff retry
//! controller, and the execution engine that classifies outcomes.

mod engine;
mod registry;
mod retry;

pub use engine::{ExecutionEngine, RuntimeConfig};
pub use registry::ActionRegistry;
pub use retry::{AttemptState, RetryController};
