//! HTTP client for the Orphadata API, plus a configurable mock.

use std::collections::HashMap;

use reqwest::Url;
use serde_json::Value;

use crate::i18n::Lang;

use super::{ApiError, OrphadataApi};

/// Default per-request timeout, matching the API contract.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Blocking HTTP client for api.orphadata.com.
pub struct OrphadataClient {
    base_url: Url,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OrphadataClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .expect("invalid Orphadata base URL");

        Self {
            base_url,
            client,
            timeout_secs,
        }
    }

    /// GET a path (segments are percent-encoded individually) with the
    /// language query parameter, returning the parsed JSON body.
    fn get_json(&self, segments: &[&str], lang: Lang) -> Result<Value, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("Orphadata base URL cannot be a base")
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("language", lang.code_upper());

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(self.timeout_secs)
                } else {
                    ApiError::Connect(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response.json().map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl OrphadataApi for OrphadataClient {
    fn cross_reference_by_name(&self, name: &str, lang: Lang) -> Result<Value, ApiError> {
        self.get_json(
            &["rd-cross-referencing", "orphacodes", "names", name],
            lang,
        )
    }

    fn cross_reference_by_code(&self, code: &str, lang: Lang) -> Result<Value, ApiError> {
        self.get_json(&["rd-cross-referencing", "orphacodes", code], lang)
    }

    fn phenotypes(&self, code: &str, lang: Lang) -> Result<Value, ApiError> {
        self.get_json(&["rd-phenotypes", "orphacodes", code], lang)
    }

    fn child_code_groups(&self, code: &str, lang: Lang) -> Result<Value, ApiError> {
        self.get_json(
            &["rd-classification", "orphacodes", code, "hchids"],
            lang,
        )
    }
}

/// Mock Orphadata API for testing — canned responses per endpoint and key.
/// Unconfigured keys answer with HTTP 404.
#[derive(Default)]
pub struct MockOrphadata {
    by_name: HashMap<String, Result<Value, ApiError>>,
    by_code: HashMap<String, Result<Value, ApiError>>,
    phenotypes: HashMap<String, Result<Value, ApiError>>,
    children: HashMap<String, Result<Value, ApiError>>,
}

impl MockOrphadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_result(mut self, name: &str, value: Value) -> Self {
        self.by_name.insert(name.to_string(), Ok(value));
        self
    }

    pub fn with_name_error(mut self, name: &str, err: ApiError) -> Self {
        self.by_name.insert(name.to_string(), Err(err));
        self
    }

    pub fn with_code_result(mut self, code: &str, value: Value) -> Self {
        self.by_code.insert(code.to_string(), Ok(value));
        self
    }

    pub fn with_phenotypes(mut self, code: &str, value: Value) -> Self {
        self.phenotypes.insert(code.to_string(), Ok(value));
        self
    }

    pub fn with_phenotypes_error(mut self, code: &str, err: ApiError) -> Self {
        self.phenotypes.insert(code.to_string(), Err(err));
        self
    }

    pub fn with_children(mut self, code: &str, value: Value) -> Self {
        self.children.insert(code.to_string(), Ok(value));
        self
    }

    fn answer(
        table: &HashMap<String, Result<Value, ApiError>>,
        key: &str,
    ) -> Result<Value, ApiError> {
        table
            .get(key)
            .cloned()
            .unwrap_or(Err(ApiError::Status(404)))
    }
}

impl OrphadataApi for MockOrphadata {
    fn cross_reference_by_name(&self, name: &str, _lang: Lang) -> Result<Value, ApiError> {
        Self::answer(&self.by_name, name)
    }

    fn cross_reference_by_code(&self, code: &str, _lang: Lang) -> Result<Value, ApiError> {
        Self::answer(&self.by_code, code)
    }

    fn phenotypes(&self, code: &str, _lang: Lang) -> Result<Value, ApiError> {
        Self::answer(&self.phenotypes, code)
    }

    fn child_code_groups(&self, code: &str, _lang: Lang) -> Result<Value, ApiError> {
        Self::answer(&self.children, code)
    }
}
