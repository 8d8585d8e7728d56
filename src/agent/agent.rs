//! The per-session agent: instructions, tools, and entry behavior.

use std::sync::Arc;

use tracing::info;

use super::session::{GreetingAction, SessionService};
use crate::config::SessionConfig;
use crate::error::AgentError;
use crate::room::RoomContext;
use crate::tools::{InvocableTool, ToolSet, ToolSetBuilder};

/// An agent whose tools are defined by session configuration.
///
/// The tool set is fixed at construction and lives as long as the session.
#[derive(Debug)]
pub struct DynamicAgent {
    instructions: String,
    tools: ToolSet,
    greeting: GreetingAction,
}

impl DynamicAgent {
    /// Build the agent for a session. Client tools resolve the room through
    /// `room_context` on each call.
    pub fn new(config: &SessionConfig, room_context: Arc<dyn RoomContext>) -> Self {
        let tools = ToolSetBuilder::new(room_context)
            .with_tool_token(config.tool_token())
            .build(&config.tools);
        Self::from_parts(config, tools)
    }

    /// Build from an already assembled tool set.
    pub fn from_parts(config: &SessionConfig, tools: ToolSet) -> Self {
        Self {
            instructions: config.instructions().to_string(),
            tools,
            greeting: GreetingAction::from_config(config),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tool_set(&self) -> &ToolSet {
        &self.tools
    }

    /// Tools to register with the conversation engine.
    pub fn tools(&self) -> &[InvocableTool] {
        self.tools.tools()
    }

    pub fn greeting(&self) -> &GreetingAction {
        &self.greeting
    }

    /// Called once when the agent joins the session.
    pub async fn on_enter(&self, session: &dyn SessionService) -> Result<(), AgentError> {
        info!(greeting = ?self.greeting, "Agent entered session");
        self.greeting.perform(session).await
    }
}
