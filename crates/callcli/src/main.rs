// crates/callcli/src/main.rs

use anyhow::Result;
use callcore::{NodeFlow, NodeType, Properties, Value};
use callnodes::HttpKnowledgeBase;
use callruntime::{ActionRegistry, ExecutionEngine};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "callflow")]
#[command(about = "Single-node call-flow runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one node of a flow file
    Run {
        /// Path to flow JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Unique id of the node to execute
        #[arg(short, long)]
        node: String,

        /// User inputs as key=value pairs (repeatable)
        #[arg(short, long)]
        input: Vec<String>,

        /// User inputs as a JSON object (overrides --input)
        #[arg(long)]
        input_json: Option<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a flow file against the supported node types
    Validate {
        /// Path to flow JSON file
        file: PathBuf,
    },

    /// List available node types
    Nodes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            node,
            input,
            input_json,
            verbose,
        } => {
            let level = if verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::WARN
            };
            tracing_subscriber::fmt().with_max_level(level).init();

            run_node(file, node, input, input_json).await?;
        }

        Commands::Validate { file } => {
            validate_flow(file)?;
        }

        Commands::Nodes => {
            list_nodes();
        }
    }

    Ok(())
}

/// Parse `--input key=value` pairs into properties.
fn parse_pairs(pairs: &[String]) -> Result<Properties> {
    let mut properties = Properties::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("input must be key=value, got: {}", pair))?;
        properties.insert(key.to_string(), Value::from(value));
    }
    Ok(properties)
}

fn parse_input_json(raw: &str) -> Result<Properties> {
    let json: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Object(obj) = json else {
        return Err(anyhow::anyhow!("--input-json must be a JSON object"));
    };
    Ok(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
}

async fn run_node(
    file: PathBuf,
    node_id: String,
    input: Vec<String>,
    input_json: Option<String>,
) -> Result<()> {
    println!("🚀 Loading flow from: {}", file.display());

    let flow_json = std::fs::read_to_string(&file)?;
    let flow: NodeFlow = serde_json::from_str(&flow_json)?;

    let inputs = match input_json {
        Some(raw) => parse_input_json(&raw)?,
        None => parse_pairs(&input)?,
    };

    let node = flow.find_node(&node_id).cloned().map(|mut node| {
        node.merge_inputs(inputs);
        node
    });

    if let Some(node) = &node {
        println!("⚡ Executing node {} ({})", node_id, node.node_type);
    }

    let engine = build_engine();
    let result = engine.execute(node.as_ref()).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.status.is_ok() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn validate_flow(file: PathBuf) -> Result<()> {
    println!("🔍 Validating flow: {}", file.display());

    let flow_json = std::fs::read_to_string(&file)?;
    let flow: NodeFlow = serde_json::from_str(&flow_json)?;

    let mut unknown = 0;
    for node in &flow.nodes {
        if NodeType::from_tag(&node.node_type).is_none() {
            unknown += 1;
            println!(
                "  ❌ {}: unknown node type {}",
                node.unique_id.as_deref().unwrap_or("<no id>"),
                node.node_type
            );
        }
    }

    println!("✅ Flow parsed: {} nodes, {} unknown", flow.nodes.len(), unknown);

    if unknown > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn list_nodes() {
    println!("📦 Available node types:");
    println!();

    let engine = build_engine();
    for tag in engine.registry().node_types() {
        println!("  • {}", tag);
    }
}

fn build_engine() -> ExecutionEngine {
    let knowledge_base_url = std::env::var("KNOWLEDGE_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000/query/".to_string());
    let knowledge_base = Arc::new(HttpKnowledgeBase::new(knowledge_base_url));

    let mut registry = ActionRegistry::new();
    callnodes::register_all(&mut registry, knowledge_base);
    ExecutionEngine::new(Arc::new(registry))
}
