//! Tool descriptors as supplied by session configuration, and the validated
//! specs built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Loosely typed tool entry read from session metadata.
///
/// Nothing here is trusted yet; see [`super::validation`] for the checks that
/// turn a descriptor into a [`ClientToolSpec`] or [`ServerToolSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<ToolKind>,
    #[serde(default)]
    pub args: BTreeMap<String, String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl ToolDescriptor {
    /// Declared kind, defaulting to [`ToolKind::Client`].
    pub fn kind(&self) -> ToolKind {
        self.kind.unwrap_or_default()
    }

    /// Name for log lines; `unknown` when unset.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "unknown"
        } else {
            &self.name
        }
    }
}

/// Where a tool executes.
///
/// Any `type` value other than `"server"` is treated as a client tool.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToolKind {
    Server,
    #[default]
    #[serde(other)]
    Client,
}

/// HTTP methods a server tool may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALLOWED: &'static [&'static str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A validated client (RPC) tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToolSpec {
    pub name: String,
    pub description: String,
    pub args: BTreeMap<String, String>,
}

/// A validated server (HTTP) tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerToolSpec {
    pub name: String,
    pub description: String,
    pub args: BTreeMap<String, String>,
    pub url: String,
    pub method: HttpMethod,
}

/// Closed set of tool variants a descriptor can become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSpec {
    Client(ClientToolSpec),
    Server(ServerToolSpec),
}

impl ToolSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Client(spec) => &spec.name,
            Self::Server(spec) => &spec.name,
        }
    }
}
