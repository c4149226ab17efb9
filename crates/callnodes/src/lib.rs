//! Standard action handler library
//!
//! One handler per supported node type. Every handler checks `force_fail`
//! first, validates its inputs, performs its (simulated) side effect, and
//! returns an outcome; failures always travel through the error channel.

mod call;
mod connectivity;
mod knowledge;
mod meeting;
mod messaging;
mod wait;

pub use call::{EndCallHandler, StartCallHandler};
pub use connectivity::ConnectivityHandler;
pub use knowledge::{HttpKnowledgeBase, KnowledgeBaseCallHandler};
pub use meeting::ScheduleMeetingHandler;
pub use messaging::{EmailSentHandler, SmsSentHandler};
pub use wait::WaitingForResponseHandler;

use callcore::{KnowledgeBase, NodeType};
use callruntime::ActionRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Stand-in for the real side effect: takes non-zero time and is safe to
/// repeat, matching the idempotency the retry controller assumes.
pub(crate) async fn simulate_side_effect() {
    tokio::time::sleep(Duration::from_secs(1)).await;
}

/// Register all standard handlers with a registry. The knowledge-base
/// collaborator is injected so tests can substitute a stub.
pub fn register_all(registry: &mut ActionRegistry, knowledge_base: Arc<dyn KnowledgeBase>) {
    registry.register(Arc::new(StartCallHandler));
    registry.register(Arc::new(EndCallHandler));
    registry.register(Arc::new(EmailSentHandler));
    registry.register(Arc::new(SmsSentHandler));
    registry.register(Arc::new(KnowledgeBaseCallHandler::new(knowledge_base)));
    registry.register(Arc::new(ScheduleMeetingHandler));
    registry.register(Arc::new(WaitingForResponseHandler));
    registry.register(Arc::new(ConnectivityHandler::new(NodeType::ApiConnectivity)));
    registry.register(Arc::new(ConnectivityHandler::new(NodeType::Http)));
    registry.register(Arc::new(ConnectivityHandler::new(NodeType::Webhook)));
}
