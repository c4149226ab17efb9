use crate::simulate_side_effect;
use async_trait::async_trait;
use callcore::{
    check_force_fail, input_or, require_all, require_input, ActionError, ActionHandler,
    ExecutionContext, NodeType, Outcome, Properties,
};

/// Sends the configured email. Recipient and subject fall back to
/// placeholder defaults when not provided.
pub struct EmailSentHandler;

#[async_trait]
impl ActionHandler for EmailSentHandler {
    fn node_type(&self) -> NodeType {
        NodeType::EmailSent
    }

    async fn invoke(
        &self,
        _ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "emailSent")?;
        let recipient = input_or(inputs, "recipient", "unknown@example.com");
        let subject = input_or(inputs, "title", "No Subject");
        let description = input_or(inputs, "description", "No Description");

        tracing::info!(%recipient, %subject, "sending email");
        tracing::debug!(%description, "email body");
        simulate_side_effect().await;

        Ok(Outcome::success(format!(
            "Email sent to {} with subject: {}",
            recipient, subject
        )))
    }
}

/// Sends an SMS to the given phone number.
pub struct SmsSentHandler;

#[async_trait]
impl ActionHandler for SmsSentHandler {
    fn node_type(&self) -> NodeType {
        NodeType::SmsSent
    }

    async fn invoke(
        &self,
        _ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "smsSent")?;
        require_all(inputs, &["phone_number", "message"])?;
        let phone_number = require_input(inputs, "phone_number")?.to_string();
        let message = require_input(inputs, "message")?.to_string();

        tracing::info!(%phone_number, "sending sms");
        simulate_side_effect().await;

        Ok(Outcome::success(format!(
            "SMS sent to {} with message: {}",
            phone_number, message
        )))
    }
}
