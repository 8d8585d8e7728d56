//! Handlers for the `tools` and `call` subcommands.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::error::AgentError;
use crate::room::RoomSlot;
use crate::tools::{ToolArguments, ToolExecutionContext, ToolSet, ToolSetBuilder};

/// Read metadata given inline or as `@path`.
pub fn read_metadata(arg: &str) -> Result<String, AgentError> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            AgentError::Configuration(format!("Failed to read metadata file '{path}': {e}"))
        }),
        None => Ok(arg.to_string()),
    }
}

/// Build the tool set for `metadata`. No room is attached, so client tools
/// report that they cannot reach a participant.
pub fn build_tool_set(metadata: &str) -> ToolSet {
    let config = SessionConfig::from_metadata(metadata);
    ToolSetBuilder::new(Arc::new(RoomSlot::new()))
        .with_tool_token(config.tool_token())
        .build(&config.tools)
}

/// JSON report of compiled schemas and skipped descriptors.
pub fn tool_report(set: &ToolSet) -> serde_json::Value {
    let tools: Vec<_> = set.schemas().iter().map(|s| s.to_function_json()).collect();
    let skipped: Vec<_> = set
        .skipped()
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name,
                "type": s.kind.to_string(),
                "reason": s.reason.to_string(),
            })
        })
        .collect();

    serde_json::json!({
        "tools": tools,
        "client": set.client_tools(),
        "server": set.server_tools(),
        "skipped": skipped,
    })
}

pub async fn handle_tools(metadata_arg: &str) -> Result<(), AgentError> {
    let metadata = read_metadata(metadata_arg)?;
    let set = build_tool_set(&metadata);
    println!("{}", serde_json::to_string_pretty(&tool_report(&set))?);
    Ok(())
}

pub async fn handle_call(metadata_arg: &str, tool: &str, args: &str) -> Result<(), AgentError> {
    let metadata = read_metadata(metadata_arg)?;
    let set = build_tool_set(&metadata);
    let tool = set
        .get(tool)
        .ok_or_else(|| AgentError::InvalidArgument(format!("Tool '{tool}' is not configured")))?;

    let args = ToolArguments::from_value(serde_json::from_str(args)?)?;
    let result = tool.invoke(&args, &ToolExecutionContext::default()).await;
    println!("{result}");
    Ok(())
}
