use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vizier::{ChartRecommender, RecommenderConfig};

/// Recommend chart types for a question and its answer.
#[derive(Parser, Debug)]
#[command(name = "vizier", version)]
struct Args {
    /// The user's question
    #[arg(short, long)]
    query: String,

    /// The answer text
    #[arg(short, long, conflicts_with = "response_file", required_unless_present = "response_file")]
    response: Option<String>,

    /// Read the answer text from a file
    #[arg(long, value_name = "PATH")]
    response_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Include rationales and extracted features in the output
    #[arg(long)]
    explain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vizier=info")))
        .init();

    let args = Args::parse();

    let config = RecommenderConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let response = match (args.response, args.response_file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("either --response or --response-file is required"),
    };

    let warm_up = config.models.warm_up;
    let engine = Arc::new(ChartRecommender::from_config(config));
    if warm_up {
        // requests arriving first wait on the same load lock
        drop(engine.models().warm_up());
    }

    let query = args.query;
    let explain = args.explain;
    let output = tokio::task::spawn_blocking(move || -> Result<Value, serde_json::Error> {
        let recommendation = engine.recommend(&query, &response);
        if !explain {
            return serde_json::to_value(&recommendation);
        }

        let breakdown = engine.analyze(&query, &response);
        let charts: Vec<Value> = recommendation
            .iter()
            .map(|c| {
                json!({
                    "chart": c.chart(),
                    "score": c.score(),
                    "category": c.chart().category(),
                    "rationale": c.chart().rationale(),
                })
            })
            .collect();

        Ok(json!({
            "recommendation": serde_json::to_value(&recommendation)?,
            "charts": charts,
            "features": serde_json::to_value(&breakdown.features)?,
        }))
    })
    .await
    .context("recommendation task failed")??;

    info!("Recommendation ready");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
