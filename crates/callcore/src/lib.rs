//! Core abstractions for single-node call-flow execution
//!
//! This crate provides the fundamental types and traits that all other
//! components depend on: the node model, the action handler contract,
//! execution outcomes, and the error taxonomy. It has no runtime machinery.

mod context;
mod error;
mod flow;
mod knowledge;
mod node;
mod outcome;
mod policy;
mod value;

pub use context::{ExecutionContext, CALLER_ID};
pub use error::{ActionError, ExhaustedError};
pub use flow::NodeFlow;
pub use knowledge::{KnowledgeBase, KnowledgeError};
pub use node::{
    check_force_fail, input_or, require_all, require_input, ActionHandler, Node, NodeConfig,
    NodeType, Properties,
};
pub use outcome::{FinalResult, FinalStatus, Outcome};
pub use policy::RetryPolicy;
pub use value::Value;
