use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use comgpt_core::{
    graph::loader::{load_edge_list, load_graph},
    ComGpt, GroundTruth, OpenAiClient, TextPromptBuilder,
};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("comgpt=info,comgpt_core=info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("comgpt failed: {:#}", e);
            Err(e)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let graph = match &args.nodes {
        Some(nodes) => load_graph(nodes, &args.edges),
        None => load_edge_list(&args.edges),
    }
    .with_context(|| format!("Failed to load graph from {}", args.edges.display()))?;
    let stats = graph.stats();
    info!(
        "Graph loaded: {} nodes, {} edges, max degree {}",
        stats.node_count, stats.edge_count, stats.max_degree
    );

    let llm_client = OpenAiClient::new(args.llm_config())
        .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;
    info!("Using model {}", llm_client.model());

    let prompts = TextPromptBuilder::new(args.encoding(), args.strategy);
    let engine = ComGpt::with_llm_client(
        Arc::new(graph),
        Arc::new(llm_client),
        Arc::new(prompts),
        args.expansion_config(),
    )?;

    let output = match &args.truth {
        Some(path) => {
            let truth = GroundTruth::load(path, args.truth_format)
                .with_context(|| format!("Failed to load ground truth from {}", path.display()))?;
            let report = engine
                .evaluate_seeds(&args.seeds, &truth, args.resolution)
                .await?;
            serde_json::to_value(&report)?
        }
        None => {
            let mut communities = Vec::with_capacity(args.seeds.len());
            for &seed in &args.seeds {
                let record = engine.detect(seed).await?;
                communities.push(json!({
                    "seed": seed,
                    "community": record.community.distinct(),
                    "cohesion": record.cohesion,
                }));
            }
            json!({ "communities": communities })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
