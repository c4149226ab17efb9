use thiserror::Error;

/// Failure raised by a single handler attempt
///
/// Handlers signal failure through this channel only; a success-shaped
/// outcome that merely reports a negative business result is not a failure
/// and is never retried.
#[derive(Error, Debug, Clone)]
pub enum ActionError {
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Forced failure for retry test ({0})")]
    Forced(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// The retry controller gave up: attempts ran out or the schedule-to-close
/// deadline passed. Carries the last attempt's failure message.
#[derive(Error, Debug, Clone)]
#[error("retries exhausted after {attempts} attempt(s): {message}")]
pub struct ExhaustedError {
    pub attempts: u32,
    pub message: String,
    pub timed_out: bool,
}

impl ExhaustedError {
    pub fn attempts_spent(attempts: u32, last: Option<ActionError>) -> Self {
        Self {
            attempts,
            message: describe(last),
            timed_out: false,
        }
    }

    pub fn deadline_passed(attempts: u32, last: Option<ActionError>) -> Self {
        Self {
            attempts,
            message: describe(last),
            timed_out: true,
        }
    }
}

fn describe(last: Option<ActionError>) -> String {
    match last {
        Some(err) => err.to_string(),
        None => "schedule-to-close timeout elapsed before any attempt finished".to_string(),
    }
}
