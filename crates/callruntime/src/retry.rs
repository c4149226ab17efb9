use callcore::{ActionError, ActionHandler, ExecutionContext, ExhaustedError, Outcome, Properties, RetryPolicy};
use tokio::time::{sleep, timeout_at, Instant};

/// Lifecycle of one attempt inside the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Bounded exponential-backoff retry around a handler invocation
///
/// Attempts run strictly sequentially; the wait between them is a tokio
/// timer suspension, so unrelated executions keep making progress. The
/// whole sequence, waits included, races one schedule-to-close deadline.
pub struct RetryController {
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Invoke `handler` up to `max_attempts` times. Only an `Err` attempt
    /// retries; any `Ok` outcome returns immediately, even one whose
    /// content reports a negative business result. Crossing the deadline
    /// mid-attempt or mid-wait yields exhaustion carrying the last
    /// failure's message; an uncancellable in-flight side effect may still
    /// complete but its result is discarded.
    pub async fn run(
        &self,
        handler: &dyn ActionHandler,
        ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ExhaustedError> {
        let deadline = Instant::now() + self.policy.schedule_to_close;
        let mut interval = self.policy.initial_interval;
        let mut last_failure: Option<ActionError> = None;

        for attempt in 1..=self.policy.max_attempts {
            let mut state = AttemptState::Pending;
            tracing::trace!(attempt, ?state, "attempt scheduled");

            state = AttemptState::Running;
            tracing::debug!(attempt, ?state, node_type = %handler.node_type(), "invoking handler");

            match timeout_at(deadline, handler.invoke(ctx, inputs)).await {
                Ok(Ok(outcome)) => {
                    state = AttemptState::Succeeded;
                    tracing::debug!(attempt, ?state, "attempt succeeded");
                    return Ok(outcome);
                }
                Ok(Err(err)) => {
                    state = AttemptState::Failed;
                    tracing::warn!(attempt, ?state, error = %err, "attempt failed");
                    last_failure = Some(err);
                }
                Err(_elapsed) => {
                    tracing::warn!(attempt, "schedule-to-close timeout hit mid-attempt");
                    return Err(ExhaustedError::deadline_passed(attempt, last_failure));
                }
            }

            if attempt < self.policy.max_attempts {
                tracing::debug!(attempt, wait_ms = interval.as_millis() as u64, "backing off");
                if timeout_at(deadline, sleep(interval)).await.is_err() {
                    tracing::warn!(attempt, "schedule-to-close timeout hit mid-wait");
                    return Err(ExhaustedError::deadline_passed(attempt, last_failure));
                }
                interval = self.policy.next_interval(interval);
            }
        }

        Err(ExhaustedError::attempts_spent(
            self.policy.max_attempts,
            last_failure,
        ))
    }
}
