use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder, Result as ActixResult};
use callcore::{Node, NodeFlow, Properties};
use callnodes::HttpKnowledgeBase;
use callruntime::{ActionRegistry, ExecutionEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Holds the currently uploaded flow document
///
/// Injected into the HTTP boundary instead of living in a global, so each
/// server instance owns its flow state explicitly.
struct FlowRepository {
    flow: RwLock<Option<NodeFlow>>,
}

impl FlowRepository {
    fn new() -> Self {
        Self {
            flow: RwLock::new(None),
        }
    }

    async fn store(&self, flow: NodeFlow) {
        *self.flow.write().await = Some(flow);
    }

    async fn current(&self) -> Option<NodeFlow> {
        self.flow.read().await.clone()
    }

    async fn find_node(&self, unique_id: &str) -> Option<Node> {
        self.flow
            .read()
            .await
            .as_ref()
            .and_then(|flow| flow.find_node(unique_id).cloned())
    }

    async fn is_loaded(&self) -> bool {
        self.flow.read().await.is_some()
    }
}

/// Application state shared across handlers
struct AppState {
    engine: Arc<ExecutionEngine>,
    flows: Arc<FlowRepository>,
}

/// Request body for executing a single node
#[derive(Debug, Deserialize)]
struct RunNodeRequest {
    node_id: String,
    #[serde(default)]
    inputs: Properties,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// Health check endpoint
#[get("/status")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "API is running"
    }))
}

/// Upload a flow document, replacing any previously stored one
#[post("/upload_node_flow")]
async fn upload_node_flow(
    data: web::Data<AppState>,
    flow: web::Json<NodeFlow>,
) -> ActixResult<impl Responder> {
    let flow = flow.into_inner();
    info!(nodes = flow.nodes.len(), "storing uploaded node flow");
    data.flows.store(flow).await;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Node flow uploaded successfully from raw JSON".to_string(),
    }))
}

/// Return the currently stored flow document
#[get("/node_flow")]
async fn get_node_flow(data: web::Data<AppState>) -> ActixResult<impl Responder> {
    match data.flows.current().await {
        Some(flow) => Ok(HttpResponse::Ok().json(flow)),
        None => Ok(HttpResponse::NotFound().json(MessageResponse {
            message: "No node flow uploaded.".to_string(),
        })),
    }
}

/// Execute a single node of the uploaded flow
///
/// 200 for `success` and `no_input`, 400 for `error` and `failed`; a panic
/// escaping the engine degrades to a "Try Again" body instead of tearing
/// down the connection.
#[post("/run_single_node")]
async fn run_single_node(
    data: web::Data<AppState>,
    req: web::Json<RunNodeRequest>,
) -> ActixResult<impl Responder> {
    let req = req.into_inner();

    if !data.flows.is_loaded().await {
        return Ok(HttpResponse::BadRequest().json(MessageResponse {
            message: "Node flow data not uploaded. Please upload using /upload_node_flow first."
                .to_string(),
        }));
    }

    info!(node_id = %req.node_id, "running single node");

    let node = data.flows.find_node(&req.node_id).await.map(|mut node| {
        node.merge_inputs(req.inputs);
        node
    });

    let engine = data.engine.clone();
    let result = match tokio::spawn(async move { engine.execute(node.as_ref()).await }).await {
        Ok(result) => result,
        Err(e) => {
            error!(node_id = %req.node_id, error = %e, "node execution aborted");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error_message": format!("Workflow failed: {}", e),
                "message": "Try Again"
            })));
        }
    };

    if result.status.is_ok() {
        Ok(HttpResponse::Ok().json(result))
    } else {
        Ok(HttpResponse::BadRequest().json(result))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting call-flow server");

    // Create the engine with all standard handlers registered
    let knowledge_base_url = std::env::var("KNOWLEDGE_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000/query/".to_string());
    let knowledge_base = Arc::new(HttpKnowledgeBase::new(knowledge_base_url));

    let mut registry = ActionRegistry::new();
    callnodes::register_all(&mut registry, knowledge_base);
    let engine = ExecutionEngine::new(Arc::new(registry));

    info!("Engine initialized with standard handlers");

    let app_state = web::Data::new(AppState {
        engine: Arc::new(engine),
        flows: Arc::new(FlowRepository::new()),
    });

    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    info!("Server starting on http://{}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .service(health_check)
            .service(upload_node_flow)
            .service(get_node_flow)
            .service(run_single_node)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
