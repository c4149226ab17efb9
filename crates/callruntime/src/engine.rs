use crate::{ActionRegistry, RetryController};
use callcore::{ExecutionContext, FinalResult, Node, NodeType, Outcome, RetryPolicy, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Configuration for the execution engine
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub retry: RetryPolicy,
}

/// Top-level entry point: executes one node to completion or final failure
///
/// Every failure degrades to a [`FinalResult`] value; nothing below this
/// boundary terminates the process.
pub struct ExecutionEngine {
    registry: Arc<ActionRegistry>,
    controller: RetryController,
}

impl ExecutionEngine {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self::with_config(registry, RuntimeConfig::default())
    }

    pub fn with_config(registry: Arc<ActionRegistry>, config: RuntimeConfig) -> Self {
        Self {
            registry,
            controller: RetryController::new(config.retry),
        }
    }

    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// Execute a single node. `None` means the flow lookup found nothing.
    pub async fn execute(&self, node: Option<&Node>) -> FinalResult {
        let Some(node) = node else {
            return FinalResult::error("Node not found");
        };

        let inputs = node.properties();
        if inputs.values().all(Value::is_blank) {
            return FinalResult::no_input();
        }

        let Some(handler) = self.registry.resolve(&node.node_type) else {
            return FinalResult::error(format!("No activity for node type {}", node.node_type));
        };

        let execution_id = Uuid::new_v4();
        tracing::info!(%execution_id, node_type = %node.node_type, "executing node");

        let mut ctx = ExecutionContext::new();
        match self.controller.run(handler.as_ref(), &mut ctx, inputs).await {
            Ok(outcome) => {
                let result = classify(&node.node_type, outcome);
                tracing::info!(%execution_id, status = ?result.status, "node execution finished");
                result
            }
            Err(exhausted) => {
                tracing::warn!(%execution_id, error = %exhausted, "retries exhausted");
                FinalResult::failed()
            }
        }
    }
}

/// Classify a terminal outcome. Ordering is significant: the generic
/// success check comes first, and the bare-response shape is honored only
/// for the three connectivity types — any other type returning it is
/// classified as failed.
fn classify(tag: &str, outcome: Outcome) -> FinalResult {
    match outcome {
        Outcome::Success { message } | Outcome::Started { message } => {
            FinalResult::success(message)
        }
        Outcome::Response { response } => match NodeType::from_tag(tag) {
            Some(node_type) if node_type.is_connectivity() => {
                FinalResult::connectivity_success(node_type.as_tag(), &response)
            }
            _ => FinalResult::failed(),
        },
    }
}
