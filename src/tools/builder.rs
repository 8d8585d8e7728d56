//! Assemble the session's tool set from configured descriptors.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::descriptor::{ToolDescriptor, ToolKind, ToolSpec};
use super::http::{HttpTool, SERVER_TOOL_TIMEOUT};
use super::rpc::RpcTool;
use super::tool::InvocableTool;
use super::types::ToolSchema;
use super::validation::{validate_client_descriptor, validate_server_descriptor};
use crate::config::ToolToken;
use crate::error::{AgentError, ServerToolConfigError};
use crate::room::RoomContext;

/// Why a descriptor did not become a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Server tools are disabled for sessions without a tool token.
    NoToolToken,
    InvalidServerConfig(ServerToolConfigError),
    /// Client tool without a name.
    MissingName,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoToolToken => f.write_str("no tool token available"),
            Self::InvalidServerConfig(e) => write!(f, "{e}"),
            Self::MissingName => f.write_str("client tool is missing a name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTool {
    pub name: String,
    pub kind: ToolKind,
    pub reason: SkipReason,
}

/// Tools accepted for a session, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: Vec<InvocableTool>,
    client_tools: Vec<String>,
    server_tools: Vec<String>,
    skipped: Vec<SkippedTool>,
}

impl ToolSet {
    pub fn tools(&self) -> &[InvocableTool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up a tool by name. With duplicate names the last one wins.
    pub fn get(&self, name: &str) -> Option<&InvocableTool> {
        self.tools.iter().rev().find(|t| t.name() == name)
    }

    pub fn client_tools(&self) -> &[String] {
        &self.client_tools
    }

    pub fn server_tools(&self) -> &[String] {
        &self.server_tools
    }

    pub fn skipped(&self) -> &[SkippedTool] {
        &self.skipped
    }

    pub fn schemas(&self) -> Vec<&ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }
}

/// Turns descriptors into invocable tools.
///
/// Client tools need the room capability; server tools need a token. Neither
/// is read from ambient state.
pub struct ToolSetBuilder {
    room_context: Arc<dyn RoomContext>,
    tool_token: Option<ToolToken>,
    server_timeout: Duration,
}

impl ToolSetBuilder {
    pub fn new(room_context: Arc<dyn RoomContext>) -> Self {
        Self {
            room_context,
            tool_token: None,
            server_timeout: SERVER_TOOL_TIMEOUT,
        }
    }

    pub fn with_tool_token(mut self, token: Option<ToolToken>) -> Self {
        self.tool_token = token;
        self
    }

    /// Override the server tool deadline.
    pub fn with_server_timeout(mut self, timeout: Duration) -> Self {
        self.server_timeout = timeout;
        self
    }

    /// Build the tool set. Rejected descriptors are logged and reported in
    /// [`ToolSet::skipped`]; they never abort the build.
    pub fn build(&self, descriptors: &[ToolDescriptor]) -> ToolSet {
        let mut set = ToolSet::default();
        let mut seen = HashSet::new();

        for descriptor in descriptors {
            let kind = descriptor.kind();
            let accepted = self.resolve(descriptor).and_then(|spec| {
                let name = spec.name().to_string();
                self.instantiate(spec).map(|tool| (name, tool))
            });

            let (name, tool) = match accepted {
                Ok(accepted) => accepted,
                Err(reason) => {
                    warn!(
                        tool = descriptor.display_name(),
                        kind = %kind,
                        reason = %reason,
                        "Skipping tool"
                    );
                    set.skipped.push(SkippedTool {
                        name: descriptor.display_name().to_string(),
                        kind,
                        reason,
                    });
                    continue;
                }
            };

            if !seen.insert(name.clone()) {
                warn!(tool = %name, "Duplicate tool name; the last definition wins");
            }
            match kind {
                ToolKind::Client => set.client_tools.push(name),
                ToolKind::Server => set.server_tools.push(name),
            }
            set.tools.push(tool);
        }

        info!(
            total = set.tools.len(),
            client = ?set.client_tools,
            server = ?set.server_tools,
            skipped = set.skipped.len(),
            "Tool set initialized"
        );
        set
    }

    fn resolve(&self, descriptor: &ToolDescriptor) -> Result<ToolSpec, SkipReason> {
        match descriptor.kind() {
            ToolKind::Server => {
                if self.tool_token.is_none() {
                    return Err(SkipReason::NoToolToken);
                }
                validate_server_descriptor(descriptor)
                    .map(ToolSpec::Server)
                    .map_err(SkipReason::InvalidServerConfig)
            }
            ToolKind::Client => validate_client_descriptor(descriptor)
                .map(ToolSpec::Client)
                .map_err(|e: AgentError| {
                    tracing::debug!(error = %e, "client descriptor rejected");
                    SkipReason::MissingName
                }),
        }
    }

    /// Map a validated spec to its handler.
    fn instantiate(&self, spec: ToolSpec) -> Result<InvocableTool, SkipReason> {
        match spec {
            ToolSpec::Client(spec) => {
                let tool = RpcTool::new(spec, self.room_context.clone());
                Ok(InvocableTool::new(tool.schema(), Arc::new(tool)))
            }
            ToolSpec::Server(spec) => {
                let token = self.tool_token.clone().ok_or(SkipReason::NoToolToken)?;
                let tool = HttpTool::new(spec, token).with_timeout(self.server_timeout);
                Ok(InvocableTool::new(tool.schema(), Arc::new(tool)))
            }
        }
    }
}

impl std::fmt::Debug for ToolSetBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSetBuilder")
            .field("tool_token", &self.tool_token)
            .field("server_timeout", &self.server_timeout)
            .finish()
    }
}
