//! Error types for dynamic-agent.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

use crate::tools::descriptor::HttpMethod;

/// Primary error type for tool construction and execution.
///
/// Handlers never return this to the conversation engine; they render it
/// into an `"Error: ..."` string at their boundary.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    ServerToolConfig(#[from] ServerToolConfigError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream answered with a non-2xx status. Only the code is kept.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("RPC '{method}' failed: {message}")]
    Rpc { method: String, message: String },

    #[error("No active room: {0}")]
    RoomUnavailable(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AgentError {
    /// Create an RPC failure for the given remote method.
    pub fn rpc(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rpc {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::ServerToolConfig(_) => ErrorCategory::Configuration,
            Self::Network(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::HttpStatus(status) => match status {
                401 | 403 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::Rpc { .. } | Self::RoomUnavailable(_) => ErrorCategory::Rpc,
            Self::InvalidArgument(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether a caller could reasonably try the same call again later.
    ///
    /// Nothing in this crate retries. Tool failure log lines carry the flag as
    /// `retryable`.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Timeout | ErrorCategory::Server
        )
    }
}

/// One problem found while validating a server tool descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// Required fields that were absent or empty, in declaration order.
    MissingFields(Vec<&'static str>),
    /// The configured method is not one of [`HttpMethod::ALLOWED`].
    InvalidMethod(String),
}

impl std::fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::InvalidMethod(method) => write!(
                f,
                "has invalid method '{method}'. Must be one of: {}",
                HttpMethod::ALLOWED.join(", ")
            ),
        }
    }
}

/// A server tool descriptor that cannot be turned into a callable tool.
///
/// Raised only while building a tool set, never during a live call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Server tool '{tool}' {}", describe_problems(.problems))]
pub struct ServerToolConfigError {
    /// Tool name as configured, or `unknown` when the name itself is missing.
    pub tool: String,
    pub problems: Vec<ConfigProblem>,
}

impl ServerToolConfigError {
    /// Fields reported missing, if any.
    pub fn missing_fields(&self) -> &[&'static str] {
        self.problems
            .iter()
            .find_map(|p| match p {
                ConfigProblem::MissingFields(fields) => Some(fields.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// The rejected method value, if the method was invalid.
    pub fn invalid_method(&self) -> Option<&str> {
        self.problems.iter().find_map(|p| match p {
            ConfigProblem::InvalidMethod(method) => Some(method.as_str()),
            _ => None,
        })
    }
}

fn describe_problems(problems: &[ConfigProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentError>;
