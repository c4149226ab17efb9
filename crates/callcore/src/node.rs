use crate::{ActionError, ExecutionContext, Outcome, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Configured inputs of a node, keyed by field name
pub type Properties = HashMap<String, Value>;

/// Closed set of node types the engine can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    StartCall,
    EmailSent,
    SmsSent,
    EndCall,
    KnowledgeBaseCall,
    ScheduleMeeting,
    WaitingForResponse,
    ApiConnectivity,
    Http,
    Webhook,
}

impl NodeType {
    pub const ALL: [NodeType; 10] = [
        NodeType::StartCall,
        NodeType::EmailSent,
        NodeType::SmsSent,
        NodeType::EndCall,
        NodeType::KnowledgeBaseCall,
        NodeType::ScheduleMeeting,
        NodeType::WaitingForResponse,
        NodeType::ApiConnectivity,
        NodeType::Http,
        NodeType::Webhook,
    ];

    /// Parse a flow-document type tag. Unknown tags are `None`, which the
    /// engine reports as a resolution error rather than a handler failure.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "startCall" => Some(NodeType::StartCall),
            "emailSent" => Some(NodeType::EmailSent),
            "smsSent" => Some(NodeType::SmsSent),
            "endCall" => Some(NodeType::EndCall),
            "knowledgeBaseCall" => Some(NodeType::KnowledgeBaseCall),
            "scheduleMeeting" => Some(NodeType::ScheduleMeeting),
            "waitingforResponse" => Some(NodeType::WaitingForResponse),
            "apiConnectivity" => Some(NodeType::ApiConnectivity),
            "http" => Some(NodeType::Http),
            "webhook" => Some(NodeType::Webhook),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            NodeType::StartCall => "startCall",
            NodeType::EmailSent => "emailSent",
            NodeType::SmsSent => "smsSent",
            NodeType::EndCall => "endCall",
            NodeType::KnowledgeBaseCall => "knowledgeBaseCall",
            NodeType::ScheduleMeeting => "scheduleMeeting",
            NodeType::WaitingForResponse => "waitingforResponse",
            NodeType::ApiConnectivity => "apiConnectivity",
            NodeType::Http => "http",
            NodeType::Webhook => "webhook",
        }
    }

    /// The three generic connectivity probes share a distinct success shape:
    /// a bare response value with no status. The engine honors that shape
    /// only for these types.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            NodeType::ApiConnectivity | NodeType::Http | NodeType::Webhook
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One step of a flow graph as stored in the flow document
///
/// Externally owned and read-only during execution. The type stays a free
/// string at the wire boundary; resolution into [`NodeType`] happens in the
/// registry so unknown tags surface as a distinguishable condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "uniqueId", default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub config: NodeConfig,
}

impl Node {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            unique_id: None,
            node_type: node_type.into(),
            config: NodeConfig::default(),
        }
    }

    pub fn with_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.properties.insert(key.into(), value.into());
        self
    }

    pub fn properties(&self) -> &Properties {
        &self.config.properties
    }

    /// Overlay user-provided inputs onto the configured properties,
    /// user values winning on conflict.
    pub fn merge_inputs(&mut self, inputs: Properties) {
        self.config.properties.extend(inputs);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub properties: Properties,
}

/// The unit of work associated with a node type
///
/// One attempt: check `force_fail`, validate inputs, perform the effect,
/// return an outcome. All failures go through `Err(ActionError)` so the
/// retry controller decides retry-vs-abort on an explicit value. Handlers
/// must tolerate being invoked more than once for the same logical attempt.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    fn node_type(&self) -> NodeType;

    async fn invoke(
        &self,
        ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError>;
}

/// Deterministic test-injected failure, checked before any other work so
/// retry behavior is observable independent of business logic.
pub fn check_force_fail(inputs: &Properties, tag: &str) -> Result<(), ActionError> {
    match inputs.get("force_fail") {
        Some(v) if v.is_truthy() => Err(ActionError::Forced(tag.to_string())),
        _ => Ok(()),
    }
}

/// Get a required input, rejecting absent and blank values.
pub fn require_input<'a>(inputs: &'a Properties, field: &str) -> Result<&'a Value, ActionError> {
    match inputs.get(field) {
        Some(v) if !v.is_blank() => Ok(v),
        _ => Err(ActionError::MissingInput(field.to_string())),
    }
}

/// Get an optional input as display text, falling back when absent or blank.
pub fn input_or(inputs: &Properties, field: &str, default: &str) -> String {
    match inputs.get(field) {
        Some(v) if !v.is_blank() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Validate that every listed field is present and non-blank, naming all
/// missing fields in one error.
pub fn require_all(inputs: &Properties, fields: &[&str]) -> Result<(), ActionError> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| inputs.get(*f).map_or(true, Value::is_blank))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ActionError::MissingInput(missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_deserializes_flow_document_shape() {
        let node: Node = serde_json::from_str(
            r#"{"uniqueId": "n1", "type": "startCall", "config": {"properties": {"caller": "alice"}}}"#,
        )
        .unwrap();
        assert_eq!(node.unique_id.as_deref(), Some("n1"));
        assert_eq!(node.node_type, "startCall");
        assert_eq!(
            node.properties().get("caller").and_then(Value::as_str),
            Some("alice")
        );
    }

    #[test]
    fn node_config_defaults_when_absent() {
        let node: Node = serde_json::from_str(r#"{"type": "endCall"}"#).unwrap();
        assert!(node.properties().is_empty());
    }

    #[test]
    fn every_tag_round_trips() {
        for node_type in NodeType::ALL {
            assert_eq!(NodeType::from_tag(node_type.as_tag()), Some(node_type));
        }
        assert_eq!(NodeType::from_tag("bogusType"), None);
    }

    #[test]
    fn connectivity_types() {
        let connectivity: Vec<NodeType> = NodeType::ALL
            .into_iter()
            .filter(NodeType::is_connectivity)
            .collect();
        assert_eq!(
            connectivity,
            vec![NodeType::ApiConnectivity, NodeType::Http, NodeType::Webhook]
        );
    }

    #[test]
    fn require_all_names_every_missing_field() {
        let mut inputs = Properties::new();
        inputs.insert("email".to_string(), Value::from("a@b.c"));
        inputs.insert("date".to_string(), Value::String("  ".to_string()));
        let err = require_all(&inputs, &["email", "date", "time", "summary"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required input: date, time, summary"
        );
    }
}
