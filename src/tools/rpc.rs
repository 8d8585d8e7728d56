//! Client tools: forward a call to the connected browser as an RPC.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::arguments::ToolArguments;
use super::descriptor::ClientToolSpec;
use super::tool::{error_text, result_text, ToolExecutionContext, ToolHandler};
use super::types::{compile_schema, ToolSchema};
use crate::error::AgentError;
use crate::room::{first_standard_participant, RoomContext, RpcRequest};

/// Returned when no browser is connected. A normal outcome, not an error.
pub const NO_BROWSER_PARTICIPANT: &str = "No browser participant found";

/// Map a snake_case tool name to the camelCase RPC method name.
///
/// The first segment is lower-cased; every later segment gets an upper-case
/// first character and lower-case rest. Empty segments from leading, trailing
/// or doubled underscores are dropped, and digits pass through unchanged.
pub fn snake_to_camel(name: &str) -> String {
    let mut segments = name.split('_').filter(|s| !s.is_empty());
    let mut out = String::with_capacity(name.len());

    if let Some(first) = segments.next() {
        out.push_str(&first.to_lowercase());
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

enum RpcOutcome {
    Delivered(String),
    NoParticipant,
}

/// Tool that performs an RPC on the first connected browser participant.
pub struct RpcTool {
    spec: ClientToolSpec,
    rpc_method: String,
    room_context: Arc<dyn RoomContext>,
}

impl RpcTool {
    pub fn new(spec: ClientToolSpec, room_context: Arc<dyn RoomContext>) -> Self {
        let rpc_method = snake_to_camel(&spec.name);
        Self {
            spec,
            rpc_method,
            room_context,
        }
    }

    pub fn schema(&self) -> ToolSchema {
        compile_schema(&self.spec.name, &self.spec.description, &self.spec.args)
    }

    /// Remote method name used for every call.
    pub fn rpc_method(&self) -> &str {
        &self.rpc_method
    }

    async fn call(&self, args: &ToolArguments) -> Result<RpcOutcome, AgentError> {
        let room = self.room_context.current_room()?;
        let Some(participant) = first_standard_participant(room.as_ref()) else {
            return Ok(RpcOutcome::NoParticipant);
        };

        let request = RpcRequest {
            destination_identity: participant.identity,
            method: self.rpc_method.clone(),
            payload: args.to_payload()?,
        };
        room.perform_rpc(request).await.map(RpcOutcome::Delivered)
    }
}

#[async_trait]
impl ToolHandler for RpcTool {
    async fn invoke(&self, args: &ToolArguments, _ctx: &ToolExecutionContext) -> String {
        let name = self.spec.name.as_str();
        info!(tool = name, method = %self.rpc_method, args = ?args.raw(), "client tool called");

        match self.call(args).await {
            Ok(RpcOutcome::Delivered(response)) => {
                info!(tool = name, result = %response, "client tool result");
                result_text(response)
            }
            Ok(RpcOutcome::NoParticipant) => {
                info!(tool = name, "client tool skipped: no browser participant");
                NO_BROWSER_PARTICIPANT.to_string()
            }
            Err(e) => {
                error!(
                    tool = name,
                    error = %e,
                    category = e.category().as_str(),
                    retryable = e.is_retryable(),
                    "client tool failed"
                );
                error_text(e)
            }
        }
    }
}
