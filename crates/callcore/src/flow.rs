use crate::Node;
use serde::{Deserialize, Serialize};

/// A visual flow document: the set of nodes the editor produced
///
/// Execution only ever touches one node at a time; the document exists so
/// the outer boundary can resolve a node id to its definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeFlow {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl NodeFlow {
    pub fn find_node(&self, unique_id: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.unique_id.as_deref() == Some(unique_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_node_by_unique_id() {
        let flow: NodeFlow = serde_json::from_str(
            r#"{"nodes": [
                {"uniqueId": "a", "type": "startCall", "config": {"properties": {"caller": "x"}}},
                {"uniqueId": "b", "type": "smsSent"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(flow.find_node("b").unwrap().node_type, "smsSent");
        assert!(flow.find_node("missing").is_none());
    }
}
