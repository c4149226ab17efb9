use crate::simulate_side_effect;
use async_trait::async_trait;
use callcore::{
    check_force_fail, require_input, ActionError, ActionHandler, ExecutionContext, NodeType,
    Outcome, Properties, CALLER_ID,
};

/// Opens a call for the configured caller and records the caller id in the
/// execution context for a later `endCall` in the same execution.
pub struct StartCallHandler;

#[async_trait]
impl ActionHandler for StartCallHandler {
    fn node_type(&self) -> NodeType {
        NodeType::StartCall
    }

    async fn invoke(
        &self,
        ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "startCall")?;
        let caller = require_input(inputs, "caller")?.to_string();

        tracing::info!(%caller, "starting call");
        simulate_side_effect().await;
        ctx.insert(CALLER_ID, caller.clone());

        Ok(Outcome::started(format!("Call started for {}", caller)))
    }
}

/// Ends the call whose caller id a prior `startCall` stored in the context.
///
/// The context does not outlive one execution, so a standalone `endCall`
/// node fails this validation on every attempt; see DESIGN.md.
pub struct EndCallHandler;

#[async_trait]
impl ActionHandler for EndCallHandler {
    fn node_type(&self) -> NodeType {
        NodeType::EndCall
    }

    async fn invoke(
        &self,
        ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "endCall")?;
        let caller_id = ctx
            .get(CALLER_ID)
            .filter(|v| !v.is_blank())
            .map(|v| v.to_string())
            .ok_or_else(|| ActionError::MissingInput(CALLER_ID.to_string()))?;

        tracing::info!(%caller_id, "ending call");
        simulate_side_effect().await;

        Ok(Outcome::success(format!("Call ended for {}", caller_id)))
    }
}
