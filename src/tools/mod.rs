//! Tools registered with the agent.

pub mod gemini_cli;

pub use gemini_cli::{CliOutcome, GeminiCliTool};
