use crate::Value;
use serde::{Deserialize, Serialize};

/// Result of one successful handler attempt
///
/// `Success` and `Started` are the uniform shape (`Started` marks an
/// asynchronous action and classifies the same). `Response` is the
/// status-less shape the connectivity probes return; the engine honors it
/// only for connectivity node types, so the asymmetry stays visible here
/// instead of being unified away.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { message: String },
    Started { message: String },
    Response { response: Value },
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome::Success {
            message: message.into(),
        }
    }

    pub fn started(message: impl Into<String>) -> Self {
        Outcome::Started {
            message: message.into(),
        }
    }

    pub fn response(value: impl Into<Value>) -> Self {
        Outcome::Response {
            response: value.into(),
        }
    }
}

/// The one externally visible result of executing a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub status: FinalStatus,
    pub message: String,
    #[serde(
        rename = "activityResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_result: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    Success,
    NoInput,
    Error,
    Failed,
}

impl FinalStatus {
    /// The HTTP boundary maps these to 200; `Error` and `Failed` map to 400.
    pub fn is_ok(&self) -> bool {
        matches!(self, FinalStatus::Success | FinalStatus::NoInput)
    }
}

impl FinalResult {
    pub fn success(activity_result: impl Into<String>) -> Self {
        Self {
            status: FinalStatus::Success,
            message: "Activity completed successfully.".to_string(),
            activity_result: Some(activity_result.into()),
        }
    }

    /// Success shape for a connectivity probe: the message names the node
    /// type and the activity result carries the bare response value.
    pub fn connectivity_success(tag: &str, response: &Value) -> Self {
        Self {
            status: FinalStatus::Success,
            message: format!("{} response.", tag),
            activity_result: Some(response.to_string()),
        }
    }

    pub fn no_input() -> Self {
        Self {
            status: FinalStatus::NoInput,
            message: "No user input value for this node.".to_string(),
            activity_result: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: FinalStatus::Error,
            message: message.into(),
            activity_result: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: FinalStatus::Failed,
            message: "The operation could not be completed after several attempts. Please try again later."
                .to_string(),
            activity_result: None,
        }
    }
}
