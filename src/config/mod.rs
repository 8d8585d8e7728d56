//! Configuration: per-session metadata and per-worker settings.
//!
//! A session is configured by an opaque metadata string attached to the job.
//! Nothing about that string is trusted; parsing never fails, it only degrades.

pub mod worker;

pub use worker::WorkerSettings;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::tools::descriptor::ToolDescriptor;

/// Instructions used when the session does not provide its own.
pub const DEFAULT_INSTRUCTIONS: &str =
    "You are a helpful voice assistant. Be concise and conversational.";

pub const DEFAULT_TTS_MODEL: &str = "elevenlabs/eleven_flash_v2_5";
pub const DEFAULT_TTS_VOICE: &str = "cgSgspJ2msm6clMCkdW9";
pub const DEFAULT_TTS_LANGUAGE: &str = "en-US";

/// Configuration for one conversation session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub instructions: Option<String>,
    pub greeting: Option<String>,
    pub greeting_instructions: Option<String>,
    #[serde(deserialize_with = "lenient_tools")]
    pub tools: Vec<ToolDescriptor>,
    pub tts: TtsConfig,
    pub auth: AuthConfig,
}

impl SessionConfig {
    /// Decode job metadata.
    ///
    /// Empty metadata yields the default config. Anything that is not a JSON
    /// object of the expected shape is logged and also yields the default.
    pub fn from_metadata(metadata: &str) -> Self {
        if metadata.trim().is_empty() {
            return Self::default();
        }

        let value = match serde_json::from_str::<serde_json::Value>(metadata) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse session metadata as JSON");
                return Self::default();
            }
        };

        let keys: Vec<String> = match value.as_object() {
            Some(map) => map.keys().cloned().collect(),
            None => {
                warn!("Session metadata is not a JSON object; using empty config");
                return Self::default();
            }
        };

        match serde_json::from_value::<SessionConfig>(value) {
            Ok(config) => {
                info!(?keys, "Parsed session config from metadata");
                config
            }
            Err(e) => {
                warn!(error = %e, "Session metadata has an unexpected shape; using empty config");
                Self::default()
            }
        }
    }

    /// Instructions for the agent, falling back to [`DEFAULT_INSTRUCTIONS`].
    pub fn instructions(&self) -> &str {
        self.instructions
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INSTRUCTIONS)
    }

    /// Bearer token for server tools, if one was supplied.
    pub fn tool_token(&self) -> Option<ToolToken> {
        self.auth
            .tool_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(ToolToken::new)
    }
}

/// Text-to-speech selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub model: String,
    pub voice: String,
    pub language: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_TTS_MODEL.to_string(),
            voice: DEFAULT_TTS_VOICE.to_string(),
            language: DEFAULT_TTS_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub tool_token: Option<String>,
}

/// Bearer credential authorizing server tool calls for one session.
#[derive(Clone, PartialEq, Eq)]
pub struct ToolToken(String);

impl ToolToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ToolToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ToolToken(..)")
    }
}

/// Keep every well-formed descriptor; drop and log the rest.
fn lenient_tools<'de, D>(deserializer: D) -> Result<Vec<ToolDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            match serde_json::from_value::<ToolDescriptor>(value) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    warn!(index, error = %e, "Dropping malformed tool descriptor");
                    None
                }
            }
        })
        .collect())
}
