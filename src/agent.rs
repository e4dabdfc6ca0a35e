//! Agent construction.

use crate::config::AgentConfig;
use crate::error::Result;
use crate::tools::GeminiCliTool;
use adk_agent::{LlmAgent, LlmAgentBuilder};
use adk_core::Llm;
use std::sync::Arc;

/// Name under which the agent registers with the runtime.
pub const AGENT_NAME: &str = "codebase_agent";

const AGENT_DESCRIPTION: &str =
    "Agent that analyzes local codebases through the Gemini CLI.";

const AGENT_INSTRUCTION: &str =
    "You are a world class software developer and you have a very powerful tool - \
     the Gemini CLI - to help analyze code, generate test plans, generate unit \
     tests, and similar tasks for codebases located in the local file system.";

/// Build the agent: one LLM agent with the Gemini CLI tool registered.
pub fn build_agent(config: &AgentConfig, model: Arc<dyn Llm>) -> Result<LlmAgent> {
    let gemini_cli = GeminiCliTool::new()
        .with_binary(config.gemini_binary.as_str())
        .with_timeout(config.tool_timeout);

    let agent = LlmAgentBuilder::new(AGENT_NAME)
        .description(AGENT_DESCRIPTION)
        .instruction(AGENT_INSTRUCTION)
        .model(model)
        .tool(Arc::new(gemini_cli))
        .build()?;

    Ok(agent)
}
