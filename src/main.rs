//! Console entry point for the Gemini CLI agent.
//!
//! ## Usage
//!
//! ```bash
//! # AI Studio backend (default build)
//! GOOGLE_API_KEY=your-key gemini-cli-agent
//!
//! # Vertex AI backend with application default credentials
//! cargo run --features vertex
//! ```

use adk_core::Llm;
use adk_model::gemini::GeminiModel;
use anyhow::{Context, Result};
use gemini_cli_agent::{build_agent, AgentConfig, IdentityResolver};
use std::sync::Arc;
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

#[cfg(feature = "vertex")]
fn build_model(config: &AgentConfig) -> Result<Arc<dyn Llm>> {
    if config.use_vertexai {
        let model = GeminiModel::new_google_cloud_adc(
            &config.project_id,
            &config.location,
            &config.model_name,
        )?;
        return Ok(Arc::new(model));
    }
    studio_model(config)
}

#[cfg(not(feature = "vertex"))]
fn build_model(config: &AgentConfig) -> Result<Arc<dyn Llm>> {
    studio_model(config)
}

fn studio_model(config: &AgentConfig) -> Result<Arc<dyn Llm>> {
    let api_key = std::env::var("GOOGLE_API_KEY")
        .or_else(|_| std::env::var("GEMINI_API_KEY"))
        .context("GOOGLE_API_KEY or GEMINI_API_KEY must be set")?;
    let model = GeminiModel::new(api_key, &config.model_name)?;
    Ok(Arc::new(model))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();
    init_tracing();

    let resolved = IdentityResolver::new().resolve().await?;
    info!(
        project_id = %resolved.project_id,
        source = ?resolved.source,
        "resolved Google Cloud project"
    );

    let config = AgentConfig::from_env(resolved.project_id);
    config.validate()?;
    config.export_env();

    let model = build_model(&config)?;
    let agent = build_agent(&config, model)?;

    adk_cli::console::run_console(
        Arc::new(agent),
        "gemini_cli_agent".to_string(),
        "user".to_string(),
    )
    .await?;

    Ok(())
}
