//! Error classification.

/// Broad error category, used to tag log lines for failed tool calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Network,
    Timeout,
    Server,
    Api,
    Rpc,
    Configuration,
    Serialization,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Server => "server",
            Self::Api => "api",
            Self::Rpc => "rpc",
            Self::Configuration => "configuration",
            Self::Serialization => "serialization",
            Self::Unknown => "unknown",
        }
    }
}
