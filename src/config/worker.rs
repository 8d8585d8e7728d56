//! Worker-level settings shared by every session a process serves.

/// Agent name the worker registers under when none is configured.
pub const DEFAULT_AGENT_NAME: &str = "Drew-94d";
pub const DEFAULT_STT_MODEL: &str = "deepgram/flux-general";
pub const DEFAULT_STT_LANGUAGE: &str = "en";
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-4.1-mini";

/// Settings read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSettings {
    pub agent_name: String,
    pub stt_model: String,
    pub stt_language: String,
    pub llm_model: String,
    pub preemptive_generation: bool,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            stt_model: DEFAULT_STT_MODEL.to_string(),
            stt_language: DEFAULT_STT_LANGUAGE.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            preemptive_generation: true,
        }
    }
}

impl WorkerSettings {
    /// Load from `.env.local` / `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or empty values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            agent_name: get("AGENT_NAME").unwrap_or(defaults.agent_name),
            stt_model: get("AGENT_STT_MODEL").unwrap_or(defaults.stt_model),
            stt_language: get("AGENT_STT_LANGUAGE").unwrap_or(defaults.stt_language),
            llm_model: get("AGENT_LLM_MODEL").unwrap_or(defaults.llm_model),
            preemptive_generation: get("AGENT_PREEMPTIVE_GENERATION")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.preemptive_generation),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
