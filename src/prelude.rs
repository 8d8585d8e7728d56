//! Convenience re-exports for common use.

pub use crate::agent::{DynamicAgent, GreetingAction, SessionService};
pub use crate::config::{SessionConfig, ToolToken};
pub use crate::error::{AgentError, Result};
pub use crate::room::{ParticipantKind, RemoteParticipant, Room, RoomContext, RoomSlot, RpcRequest};
pub use crate::tools::{
    InvocableTool, ToolArguments, ToolDescriptor, ToolExecutionContext, ToolSchema, ToolSet,
    ToolSetBuilder,
};
