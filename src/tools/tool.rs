//! Tool handler trait and the invocable tool handed to the conversation engine.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::ToolSchema;

/// Context available during tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutionContext {
    /// Identifier the engine uses to correlate the result with its call.
    pub call_id: Option<String>,
    /// Additional metadata for the tool.
    pub metadata: serde_json::Value,
}

impl ToolExecutionContext {
    pub fn with_call_id(call_id: impl Into<String>) -> Self {
        Self {
            call_id: Some(call_id.into()),
            ..Self::default()
        }
    }
}

/// Executes one tool call and reports its outcome as text.
///
/// Implementations must not panic and must not surface failures other than
/// through the returned string, which by convention starts with `"Result: "`
/// or `"Error: "`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, args: &ToolArguments, ctx: &ToolExecutionContext) -> String;
}

/// Type alias for closure-based handlers.
type HandlerFn = dyn Fn(ToolArguments, ToolExecutionContext) -> Pin<Box<dyn Future<Output = String> + Send>>
    + Send
    + Sync;

struct FnHandler {
    handler: Arc<HandlerFn>,
}

#[async_trait]
impl ToolHandler for FnHandler {
    async fn invoke(&self, args: &ToolArguments, ctx: &ToolExecutionContext) -> String {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

/// A schema paired with the handler that executes it.
#[derive(Clone)]
pub struct InvocableTool {
    schema: ToolSchema,
    handler: Arc<dyn ToolHandler>,
}

impl InvocableTool {
    pub fn new(schema: ToolSchema, handler: Arc<dyn ToolHandler>) -> Self {
        Self { schema, handler }
    }

    /// Create a tool from a closure.
    pub fn from_fn<F, Fut>(schema: ToolSchema, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        let handler: Arc<HandlerFn> = Arc::new(move |args, ctx| Box::pin(handler(args, ctx)));
        Self {
            schema,
            handler: Arc::new(FnHandler { handler }),
        }
    }

    /// Tool name (must match what the model calls).
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn description(&self) -> &str {
        &self.schema.description
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Run the handler. Always yields a string.
    pub async fn invoke(&self, args: &ToolArguments, ctx: &ToolExecutionContext) -> String {
        self.handler.invoke(args, ctx).await
    }
}

impl std::fmt::Debug for InvocableTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocableTool")
            .field("name", &self.schema.name)
            .field("description", &self.schema.description)
            .finish()
    }
}

/// Prefix a successful outcome.
pub(crate) fn result_text(value: impl std::fmt::Display) -> String {
    format!("Result: {value}")
}

/// Prefix a failed outcome.
pub(crate) fn error_text(error: impl std::fmt::Display) -> String {
    format!("Error: {error}")
}
