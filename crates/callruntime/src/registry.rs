use callcore::{ActionHandler, NodeType};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of action handlers, keyed by node type
///
/// Populated once at startup and read-only afterwards; safe to share across
/// any number of concurrent executions behind an `Arc`.
pub struct ActionRegistry {
    handlers: HashMap<NodeType, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its self-reported node type.
    pub fn register(&mut self, handler: Arc<dyn ActionHandler>) {
        let node_type = handler.node_type();
        tracing::info!(%node_type, "registering action handler");
        self.handlers.insert(node_type, handler);
    }

    /// Resolve a flow-document type tag to its handler. Pure lookup: an
    /// unknown tag or an unregistered type is `None`, which the engine
    /// reports as a resolution error, never as a handler failure.
    pub fn resolve(&self, tag: &str) -> Option<Arc<dyn ActionHandler>> {
        let node_type = NodeType::from_tag(tag)?;
        self.handlers.get(&node_type).cloned()
    }

    /// Registered node types, in tag form.
    pub fn node_types(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> =
            self.handlers.keys().map(NodeType::as_tag).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
