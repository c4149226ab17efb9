use crate::Value;
use std::collections::HashMap;

/// Context key a `startCall` handler fills in and an `endCall` handler reads.
pub const CALLER_ID: &str = "caller_id";

/// Per-execution mutable scratch state passed into each handler attempt
///
/// Created empty when a node execution starts and discarded when it
/// finishes; it never outlives one execution and is never shared across
/// concurrent executions.
#[derive(Debug, Default, Clone)]
pub struct ExecutionContext {
    data: HashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
