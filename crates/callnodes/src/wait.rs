use async_trait::async_trait;
use callcore::{
    check_force_fail, require_input, ActionError, ActionHandler, ExecutionContext, NodeType,
    Outcome, Properties, Value,
};
use std::time::Duration;

const DEFAULT_WAIT_SECONDS: f64 = 5.0;

/// Waits for an external response identified by `key`.
///
/// The wait itself is the modeled side effect; `wait_seconds` accepts a
/// number or a numeric string and defaults to 5.
pub struct WaitingForResponseHandler;

#[async_trait]
impl ActionHandler for WaitingForResponseHandler {
    fn node_type(&self) -> NodeType {
        NodeType::WaitingForResponse
    }

    async fn invoke(
        &self,
        _ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "waitingforResponse")?;
        let key = require_input(inputs, "key")?.to_string();
        let wait_seconds = inputs
            .get("wait_seconds")
            .filter(|v| !v.is_blank())
            .and_then(parse_seconds)
            .unwrap_or(DEFAULT_WAIT_SECONDS);

        tracing::info!(%key, wait_seconds, "waiting for external response");
        tokio::time::sleep(Duration::from_secs_f64(wait_seconds.max(0.0))).await;

        Ok(Outcome::success(format!("Response received for {}", key)))
    }
}

fn parse_seconds(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
