//! Runtime configuration with environment overrides.

use std::path::PathBuf;

pub const APP_NAME: &str = "Savie";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything the assistant needs at startup. Defaults match the hosted
/// deployment; every field can be overridden through a `SAVIE_*` variable.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub orphadata_base_url: String,
    pub ollama_base_url: String,
    pub generation_model: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    /// Orphadata per-request timeout.
    pub api_timeout_secs: u64,
    /// Completion and embedding timeout. Generation is slow on CPU hosts.
    pub llm_timeout_secs: u64,
    pub form_url: String,
    pub support_email: String,
    pub faq_index_path: PathBuf,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            orphadata_base_url: "https://api.orphadata.com".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            generation_model: "llama3.2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            embedding_dimension: 768,
            api_timeout_secs: 5,
            llm_timeout_secs: 30,
            form_url: "https://tst.saventiccare.de/patientendaten-formular/".to_string(),
            support_email: "info@saventiccare.de".to_string(),
            faq_index_path: default_faq_index_path(),
        }
    }
}

impl AssistantConfig {
    /// Defaults overridden by `SAVIE_*` environment variables. Unparsable
    /// numeric values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let mut set = |key: &str, slot: &mut String| {
            if let Ok(value) = std::env::var(key) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        };
        set("SAVIE_ORPHADATA_URL", &mut config.orphadata_base_url);
        set("SAVIE_OLLAMA_URL", &mut config.ollama_base_url);
        set("SAVIE_GENERATION_MODEL", &mut config.generation_model);
        set("SAVIE_EMBEDDING_MODEL", &mut config.embedding_model);
        set("SAVIE_FORM_URL", &mut config.form_url);
        set("SAVIE_SUPPORT_EMAIL", &mut config.support_email);

        if let Some(secs) = env_u64("SAVIE_API_TIMEOUT_SECS") {
            config.api_timeout_secs = secs;
        }
        if let Some(secs) = env_u64("SAVIE_LLM_TIMEOUT_SECS") {
            config.llm_timeout_secs = secs;
        }
        if let Some(dim) = env_u64("SAVIE_EMBEDDING_DIMENSION") {
            config.embedding_dimension = dim as usize;
        }
        if let Ok(path) = std::env::var("SAVIE_FAQ_INDEX") {
            if !path.is_empty() {
                config.faq_index_path = PathBuf::from(path);
            }
        }

        config
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.parse().ok()
}

fn default_faq_index_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("faq.db")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "savie=info"
}
