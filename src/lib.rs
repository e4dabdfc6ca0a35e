//! # gemini-cli-agent
//!
//! An ADK agent that analyzes codebases on the local file system by
//! driving the Gemini CLI. The crate wires three pieces together:
//!
//! 1. **Identity resolution** - determines the Google Cloud project id,
//!    probing the metadata server first (managed compute) and falling
//!    back to application default credentials (workstations)
//! 2. **Environment seeding** - exports `GOOGLE_CLOUD_PROJECT`,
//!    `GOOGLE_CLOUD_LOCATION` and `GOOGLE_GENAI_USE_VERTEXAI` defaults
//!    without overwriting operator-provided values
//! 3. **The `gemini_cli` tool** - a [`Tool`](adk_core::Tool) that runs
//!    `gemini -p <task> --include-directories <dir>` inside the codebase
//!    directory with a bounded timeout and reports every outcome as a
//!    plain string response
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gemini_cli_agent::{build_agent, AgentConfig, IdentityResolver};
//! use adk_model::gemini::GeminiModel;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolved = IdentityResolver::new().resolve().await?;
//!     let config = AgentConfig::from_env(resolved.project_id);
//!     config.validate()?;
//!     config.export_env();
//!
//!     let model = GeminiModel::new(std::env::var("GOOGLE_API_KEY")?, &config.model_name)?;
//!     let agent = build_agent(&config, Arc::new(model))?;
//!     adk_cli::console::run_console(Arc::new(agent), "app".into(), "user".into()).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod identity;
pub mod tools;

pub use agent::{build_agent, AGENT_NAME};
pub use config::{
    AgentConfig, DEFAULT_GEMINI_BINARY, DEFAULT_LOCATION, DEFAULT_MODEL, DEFAULT_TOOL_TIMEOUT,
};
pub use error::{AgentError, Result};
pub use identity::{IdentityResolver, ProjectIdSource, ResolvedProject};
pub use tools::{CliOutcome, GeminiCliTool};
