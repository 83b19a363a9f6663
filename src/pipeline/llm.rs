//! Completion client for translation and FAQ answer generation.
//!
//! Backed by a local Ollama instance. Every call is bounded by the client
//! timeout; callers that need graceful degradation wrap this behind the
//! `Translate` trait or the FAQ fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("LLM connection failed: {0}")]
    Connection(String),

    #[error("LLM request timed out after {0}s")]
    Timeout(u64),

    #[error("LLM returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("LLM response parsing error: {0}")]
    ResponseParsing(String),
}

/// Trait for LLM text generation within the pipeline.
pub trait LlmGenerate {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new client with a fixed model and request timeout.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl LlmGenerate for OllamaClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                LlmError::Connection(self.base_url.clone())
            } else {
                LlmError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Mock LLM for testing — returns a configurable response, optionally
/// failing a number of times first.
pub struct MockLlm {
    response: String,
    failures_left: std::cell::Cell<u32>,
}

impl MockLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            failures_left: std::cell::Cell::new(0),
        }
    }

    /// Fail the first `n` calls with a connection error, then succeed.
    pub fn failing_times(response: &str, n: u32) -> Self {
        Self {
            response: response.to_string(),
            failures_left: std::cell::Cell::new(n),
        }
    }
}

impl LlmGenerate for MockLlm {
    fn generate(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
        let left = self.failures_left.get();
        if left > 0 {
            self.failures_left.set(left - 1);
            return Err(LlmError::Connection("mock failure".to_string()));
        }
        Ok(self.response.clone())
    }
}
