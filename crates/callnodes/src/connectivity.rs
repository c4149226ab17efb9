use crate::simulate_side_effect;
use async_trait::async_trait;
use callcore::{
    check_force_fail, require_input, ActionError, ActionHandler, ExecutionContext, NodeType,
    Outcome, Properties,
};

/// Generic connectivity probe backing the `apiConnectivity`, `http`, and
/// `webhook` node types.
///
/// Succeeds with a bare response value rather than the uniform status
/// shape; the engine honors that shape only for these three types.
pub struct ConnectivityHandler {
    node_type: NodeType,
}

impl ConnectivityHandler {
    /// `node_type` must be one of the three connectivity types.
    pub fn new(node_type: NodeType) -> Self {
        debug_assert!(node_type.is_connectivity());
        Self { node_type }
    }
}

#[async_trait]
impl ActionHandler for ConnectivityHandler {
    fn node_type(&self) -> NodeType {
        self.node_type
    }

    async fn invoke(
        &self,
        _ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, self.node_type.as_tag())?;
        let response = require_input(inputs, "api_response")?.clone();

        tracing::info!(node_type = %self.node_type, "probing connectivity");
        simulate_side_effect().await;

        Ok(Outcome::Response { response })
    }
}
