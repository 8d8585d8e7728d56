//! Server tools: forward a call to an HTTP endpoint with bearer auth.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use super::arguments::{scalar_text, ToolArguments};
use super::descriptor::{HttpMethod, ServerToolSpec, ToolDescriptor};
use super::tool::{error_text, result_text, ToolExecutionContext, ToolHandler};
use super::types::{compile_schema, ToolSchema};
use super::validation::validate_server_descriptor;
use crate::config::ToolToken;
use crate::error::{AgentError, ServerToolConfigError};
use crate::util::timeout::with_timeout;

/// Hard per-call deadline for server tools.
pub const SERVER_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Argument that is moved from the body onto the URL path.
pub const PATH_ID_ARG: &str = "id";

/// Request resolved from one call's arguments, before it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Remaining arguments: query parameters for GET, JSON body otherwise.
    pub body: serde_json::Map<String, serde_json::Value>,
}

impl PreparedRequest {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.body
            .iter()
            .map(|(k, v)| (k.clone(), scalar_text(v)))
            .collect()
    }
}

/// Tool that issues one HTTP request per call.
///
/// Every call opens its own connection and closes it before returning, on
/// success, failure and timeout alike. Nothing is pooled between calls.
pub struct HttpTool {
    spec: ServerToolSpec,
    token: ToolToken,
    timeout: Duration,
}

impl HttpTool {
    pub fn new(spec: ServerToolSpec, token: ToolToken) -> Self {
        Self {
            spec,
            token,
            timeout: SERVER_TOOL_TIMEOUT,
        }
    }

    /// Validate a descriptor and build the tool from it.
    pub fn from_descriptor(
        descriptor: &ToolDescriptor,
        token: ToolToken,
    ) -> Result<Self, ServerToolConfigError> {
        validate_server_descriptor(descriptor).map(|spec| Self::new(spec, token))
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn schema(&self) -> ToolSchema {
        compile_schema(&self.spec.name, &self.spec.description, &self.spec.args)
    }

    /// Resolve URL and body for a call without touching the caller's
    /// arguments. An `id` argument becomes a trailing path segment.
    pub fn prepare(&self, args: &ToolArguments) -> PreparedRequest {
        let (id, body) = args.split_off(PATH_ID_ARG);
        let url = match id {
            Some(id) => format!("{}/{}", self.spec.url, scalar_text(&id)),
            None => self.spec.url.clone(),
        };

        PreparedRequest {
            method: self.spec.method,
            url,
            body,
        }
    }

    async fn dispatch(&self, prepared: &PreparedRequest) -> Result<serde_json::Value, AgentError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;
        let mut request = client
            .request(prepared.method.into(), &prepared.url)
            .bearer_auth(self.token.expose());

        if prepared.method == HttpMethod::Get {
            if !prepared.body.is_empty() {
                request = request.query(&prepared.query_pairs());
            }
        } else if !prepared.body.is_empty() {
            request = request.json(&prepared.body);
        }

        with_timeout(self.timeout, async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AgentError::HttpStatus(status.as_u16()));
            }
            Ok(response.json::<serde_json::Value>().await?)
        })
        .await
    }
}

#[async_trait]
impl ToolHandler for HttpTool {
    async fn invoke(&self, args: &ToolArguments, _ctx: &ToolExecutionContext) -> String {
        let name = self.spec.name.as_str();
        let prepared = self.prepare(args);
        info!(
            tool = name,
            method = %prepared.method,
            url = %prepared.url,
            body = ?prepared.body,
            "server tool dispatch"
        );

        let outcome = self
            .dispatch(&prepared)
            .await
            .and_then(|value| Ok(serde_json::to_string(&value)?));

        match outcome {
            Ok(body) => {
                info!(tool = name, result = %body, "server tool result");
                result_text(body)
            }
            Err(AgentError::HttpStatus(status)) => {
                error!(
                    tool = name,
                    status,
                    retryable = AgentError::HttpStatus(status).is_retryable(),
                    "server tool HTTP error"
                );
                error_text(AgentError::HttpStatus(status))
            }
            Err(e) => {
                error!(
                    tool = name,
                    error = %e,
                    category = e.category().as_str(),
                    retryable = e.is_retryable(),
                    "server tool failed"
                );
                error_text(e)
            }
        }
    }
}

impl std::fmt::Debug for HttpTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTool")
            .field("spec", &self.spec)
            .field("token", &self.token)
            .field("timeout", &self.timeout)
            .finish()
    }
}
