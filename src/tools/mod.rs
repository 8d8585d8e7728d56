//! Config-driven tools: schema compilation, RPC and HTTP adapters, and the
//! tool-set builder.

pub mod arguments;
pub mod builder;
pub mod descriptor;
pub mod http;
pub mod rpc;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use builder::{SkipReason, SkippedTool, ToolSet, ToolSetBuilder};
pub use descriptor::{ClientToolSpec, HttpMethod, ServerToolSpec, ToolDescriptor, ToolKind, ToolSpec};
pub use http::HttpTool;
pub use rpc::{snake_to_camel, RpcTool, NO_BROWSER_PARTICIPANT};
pub use tool::{InvocableTool, ToolExecutionContext, ToolHandler};
pub use types::{compile_schema, ToolSchema};
