use async_trait::async_trait;
use callcore::{
    check_force_fail, require_input, ActionError, ActionHandler, ExecutionContext, KnowledgeBase,
    KnowledgeError, NodeType, Outcome, Properties,
};
use std::sync::Arc;
use std::time::Duration;

/// Runs the configured query against the injected knowledge-base service.
///
/// Service failures surface as `ExecutionFailed`, so they get the standard
/// retry budget.
pub struct KnowledgeBaseCallHandler {
    service: Arc<dyn KnowledgeBase>,
}

impl KnowledgeBaseCallHandler {
    pub fn new(service: Arc<dyn KnowledgeBase>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ActionHandler for KnowledgeBaseCallHandler {
    fn node_type(&self) -> NodeType {
        NodeType::KnowledgeBaseCall
    }

    async fn invoke(
        &self,
        _ctx: &mut ExecutionContext,
        inputs: &Properties,
    ) -> Result<Outcome, ActionError> {
        check_force_fail(inputs, "knowledgeBaseCall")?;
        let query = require_input(inputs, "query")?.to_string();

        tracing::info!(%query, "querying knowledge base");
        let answer = self
            .service
            .query(&query)
            .await
            .map_err(|e| ActionError::ExecutionFailed(e.to_string()))?;

        Ok(Outcome::success(answer))
    }
}

const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Production knowledge-base client: posts the query to the upstream
/// document-query service and extracts its answer.
pub struct HttpKnowledgeBase {
    client: reqwest::Client,
    url: String,
    user_id: String,
    folder_id: String,
}

impl HttpKnowledgeBase {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            user_id: "default".to_string(),
            folder_id: "default".to_string(),
        }
    }

    /// Scope queries to an upstream user/folder pair.
    pub fn with_scope(mut self, user_id: impl Into<String>, folder_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.folder_id = folder_id.into();
        self
    }
}

#[async_trait]
impl KnowledgeBase for HttpKnowledgeBase {
    async fn query(&self, query: &str) -> Result<String, KnowledgeError> {
        let payload = serde_json::json!({
            "query": query,
            "user_id": self.user_id,
            "folder_id": self.folder_id,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .timeout(QUERY_TIMEOUT)
            .send()
            .await
            .map_err(|e| KnowledgeError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| KnowledgeError::Request(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| KnowledgeError::Response(e.to_string()))?;

        // Upstream replies are loosely shaped; prefer a top-level answer
        // field, otherwise hand back the raw document.
        match body.get("answer").and_then(|v| v.as_str()) {
            Some(answer) => Ok(answer.to_string()),
            None => Ok(body.to_string()),
        }
    }
}
