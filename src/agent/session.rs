//! Contract with the external conversation session.

use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::{SessionConfig, TtsConfig, WorkerSettings};
use crate::error::AgentError;
use crate::room::ParticipantKind;

/// Speech and generation surface of the running session.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Speak `text` verbatim.
    async fn say(&self, text: &str, allow_interruptions: bool) -> Result<(), AgentError>;

    /// Ask the model for a reply that follows `instructions`.
    async fn generate_reply(
        &self,
        instructions: &str,
        allow_interruptions: bool,
    ) -> Result<(), AgentError>;
}

/// What the agent does when it enters the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetingAction {
    /// Speak a literal greeting.
    Say(String),
    /// Generate a greeting following these instructions.
    Generate(String),
    Silent,
}

impl GreetingAction {
    /// A literal greeting takes precedence over greeting instructions. Empty
    /// strings count as unset.
    pub fn from_config(config: &SessionConfig) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        if let Some(greeting) = non_empty(&config.greeting) {
            Self::Say(greeting)
        } else if let Some(instructions) = non_empty(&config.greeting_instructions) {
            Self::Generate(instructions)
        } else {
            Self::Silent
        }
    }

    /// Run the action against the session. Greetings are always interruptible.
    pub async fn perform(&self, session: &dyn SessionService) -> Result<(), AgentError> {
        match self {
            Self::Say(text) => session.say(text, true).await,
            Self::Generate(instructions) => session.generate_reply(instructions, true).await,
            Self::Silent => Ok(()),
        }
    }
}

/// Noise cancellation model applied to a participant's audio input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoiseCancellation {
    /// Tuned for wideband browser audio.
    Standard,
    /// Tuned for narrowband phone audio.
    Telephony,
}

impl NoiseCancellation {
    pub fn for_participant(kind: ParticipantKind) -> Self {
        match kind {
            ParticipantKind::Sip => Self::Telephony,
            _ => Self::Standard,
        }
    }
}

/// Everything the external session needs to start the voice pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct SessionOptions {
    #[builder(into)]
    pub stt_model: String,
    #[builder(into)]
    pub stt_language: String,
    #[builder(into)]
    pub llm_model: String,
    #[builder(default)]
    pub tts: TtsConfig,
    #[builder(default = true)]
    pub turn_detection: bool,
    #[builder(default = true)]
    pub preemptive_generation: bool,
}

impl SessionOptions {
    /// Combine worker settings with the session's TTS selection.
    pub fn resolve(settings: &WorkerSettings, config: &SessionConfig) -> Self {
        Self::builder()
            .stt_model(settings.stt_model.as_str())
            .stt_language(settings.stt_language.as_str())
            .llm_model(settings.llm_model.as_str())
            .tts(config.tts.clone())
            .preemptive_generation(settings.preemptive_generation)
            .build()
    }

    pub fn noise_cancellation_for(&self, kind: ParticipantKind) -> NoiseCancellation {
        NoiseCancellation::for_participant(kind)
    }
}
