use async_trait::async_trait;
use callcore::{
    ActionError, ActionHandler, ExecutionContext, KnowledgeBase, KnowledgeError, NodeType,
    Outcome, Properties, Value, CALLER_ID,
};
use callnodes::{
    ConnectivityHandler, EmailSentHandler, EndCallHandler, KnowledgeBaseCallHandler,
    ScheduleMeetingHandler, SmsSentHandler, StartCallHandler, WaitingForResponseHandler,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn props(entries: &[(&str, &str)]) -> Properties {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn start_call_records_caller_in_context() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("caller", "alice")]);

    let outcome = StartCallHandler.invoke(&mut ctx, &inputs).await.unwrap();

    assert_eq!(outcome, Outcome::started("Call started for alice"));
    assert_eq!(ctx.get_str(CALLER_ID), Some("alice"));
}

#[tokio::test(start_paused = true)]
async fn start_call_rejects_missing_caller() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("caller", "   ")]);

    let err = StartCallHandler.invoke(&mut ctx, &inputs).await.unwrap_err();

    assert_eq!(err.to_string(), "Missing required input: caller");
    assert!(ctx.is_empty());
}

#[tokio::test(start_paused = true)]
async fn end_call_requires_caller_id_in_context() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("note", "wrap up")]);

    let err = EndCallHandler.invoke(&mut ctx, &inputs).await.unwrap_err();

    assert_eq!(err.to_string(), "Missing required input: caller_id");
}

#[tokio::test(start_paused = true)]
async fn end_call_uses_caller_id_from_context() {
    let mut ctx = ExecutionContext::new();
    ctx.insert(CALLER_ID, "alice");
    let inputs = props(&[("note", "wrap up")]);

    let outcome = EndCallHandler.invoke(&mut ctx, &inputs).await.unwrap();

    assert_eq!(outcome, Outcome::success("Call ended for alice"));
}

#[tokio::test(start_paused = true)]
async fn email_applies_defaults_for_optional_fields() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("description", "see attachment")]);

    let outcome = EmailSentHandler.invoke(&mut ctx, &inputs).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::success("Email sent to unknown@example.com with subject: No Subject")
    );
}

#[tokio::test(start_paused = true)]
async fn email_uses_provided_recipient_and_title() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("recipient", "bob@corp.test"), ("title", "Welcome")]);

    let outcome = EmailSentHandler.invoke(&mut ctx, &inputs).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::success("Email sent to bob@corp.test with subject: Welcome")
    );
}

#[tokio::test(start_paused = true)]
async fn sms_names_all_missing_fields() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("unrelated", "x")]);

    let err = SmsSentHandler.invoke(&mut ctx, &inputs).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Missing required input: phone_number, message"
    );
}

#[tokio::test(start_paused = true)]
async fn sms_sends_with_both_fields() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("phone_number", "+15550100"), ("message", "running late")]);

    let outcome = SmsSentHandler.invoke(&mut ctx, &inputs).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::success("SMS sent to +15550100 with message: running late")
    );
}

#[tokio::test(start_paused = true)]
async fn schedule_meeting_requires_all_four_fields() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("email", "a@b.c"), ("time", "10:00")]);

    let err = ScheduleMeetingHandler
        .invoke(&mut ctx, &inputs)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Missing required input: date, summary");
}

#[tokio::test(start_paused = true)]
async fn schedule_meeting_message_carries_all_fields() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[
        ("email", "a@b.c"),
        ("date", "2024-06-01"),
        ("time", "10:00"),
        ("summary", "kickoff"),
    ]);

    let outcome = ScheduleMeetingHandler
        .invoke(&mut ctx, &inputs)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::success("Meeting scheduled for a@b.c on 2024-06-01 at 10:00: kickoff")
    );
}

#[tokio::test(start_paused = true)]
async fn waiting_for_response_defaults_to_five_seconds() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("key", "order-42")]);
    let started = Instant::now();

    let outcome = WaitingForResponseHandler
        .invoke(&mut ctx, &inputs)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::success("Response received for order-42"));
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn waiting_for_response_accepts_numeric_string_wait() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("key", "order-42"), ("wait_seconds", "2")]);
    let started = Instant::now();

    WaitingForResponseHandler
        .invoke(&mut ctx, &inputs)
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn connectivity_returns_bare_response() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("api_response", "ok")]);

    let outcome = ConnectivityHandler::new(NodeType::ApiConnectivity)
        .invoke(&mut ctx, &inputs)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::response("ok"));
}

#[tokio::test(start_paused = true)]
async fn connectivity_requires_api_response() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("other", "x")]);

    let err = ConnectivityHandler::new(NodeType::Webhook)
        .invoke(&mut ctx, &inputs)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Missing required input: api_response");
}

/// `force_fail` is checked before validation and before any side effect.
#[tokio::test(start_paused = true)]
async fn force_fail_beats_validation() {
    let mut ctx = ExecutionContext::new();
    let mut inputs = Properties::new();
    inputs.insert("force_fail".to_string(), Value::Bool(true));

    let err = SmsSentHandler.invoke(&mut ctx, &inputs).await.unwrap_err();

    assert_eq!(err.to_string(), "Forced failure for retry test (smsSent)");
}

struct StubKnowledge {
    answer: Result<&'static str, &'static str>,
}

#[async_trait]
impl KnowledgeBase for StubKnowledge {
    async fn query(&self, _query: &str) -> Result<String, KnowledgeError> {
        match self.answer {
            Ok(answer) => Ok(answer.to_string()),
            Err(message) => Err(KnowledgeError::Request(message.to_string())),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn knowledge_base_call_uses_injected_service() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("query", "what is the refund policy?")]);
    let handler = KnowledgeBaseCallHandler::new(Arc::new(StubKnowledge {
        answer: Ok("Refunds are processed within 14 days."),
    }));

    let outcome = handler.invoke(&mut ctx, &inputs).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::success("Refunds are processed within 14 days.")
    );
}

#[tokio::test(start_paused = true)]
async fn knowledge_base_service_error_is_retryable_failure() {
    let mut ctx = ExecutionContext::new();
    let inputs = props(&[("query", "anything")]);
    let handler = KnowledgeBaseCallHandler::new(Arc::new(StubKnowledge {
        answer: Err("connection refused"),
    }));

    let err = handler.invoke(&mut ctx, &inputs).await.unwrap_err();

    assert!(matches!(err, ActionError::ExecutionFailed(_)));
    assert!(err.to_string().contains("connection refused"));
}
