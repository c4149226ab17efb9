use crate::simulate_side_effect;
use async_trait::async_trait;
use callcore::{
    check_force_fail, require_all, require_input, ActionError, ActionHandler, ExecutionContext,
    NodeType, Outcome, Properties,
};

/// Books a meeting; all four of email, date, time, and summary are required.
pub struct ScheduleMeetingHandler;

#[async_trait]
impl ActionHandler for ScheduleMeetingHandler {
    fn node_type(&self) -> NodeType {
        NodeType::ScheduleMeeting
    }

    async fn invoke(
        &self,
        _ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "scheduleMeeting")?;
        require_all(inputs, &["email", "date", "time", "summary"])?;
        let email = require_input(inputs, "email")?.to_string();
        let date = require_input(inputs, "date")?.to_string();
        let time = require_input(inputs, "time")?.to_string();
        let summary = require_input(inputs, "summary")?.to_string();

        tracing::info!(%email, %date, %time, "scheduling meeting");
        simulate_side_effect().await;

        Ok(Outcome::success(format!(
            "Meeting scheduled for {} on {} at {}: {}",
            email, date, time, summary
        )))
    }
}
