//! Orphadata API access: cross-referencing, phenotypes and classification.

pub mod client;
pub mod lookup;
pub mod phenotypes;
pub mod subtypes;

use serde_json::Value;
use thiserror::Error;

use crate::i18n::Lang;

/// What can go wrong talking to the Orphadata API. Each client maps these to
/// a fixed user-facing string; nothing propagates past the client boundary.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Parse(String),
}

impl ApiError {
    /// 4xx responses, including 404. Empty or wrong-shaped results are
    /// classified separately by the callers.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Status(code) if (400..500).contains(code))
    }
}

/// The four Orphadata endpoints the pipeline consumes. Implementations
/// return the raw JSON body; each client validates the shape it needs once,
/// at its own boundary.
pub trait OrphadataApi {
    /// `GET /rd-cross-referencing/orphacodes/names/{name}?language={LANG}`
    fn cross_reference_by_name(&self, name: &str, lang: Lang) -> Result<Value, ApiError>;

    /// `GET /rd-cross-referencing/orphacodes/{code}?language={LANG}`
    fn cross_reference_by_code(&self, code: &str, lang: Lang) -> Result<Value, ApiError>;

    /// `GET /rd-phenotypes/orphacodes/{code}?language={LANG}`
    fn phenotypes(&self, code: &str, lang: Lang) -> Result<Value, ApiError>;

    /// `GET /rd-classification/orphacodes/{code}/hchids?language={LANG}`
    fn child_code_groups(&self, code: &str, lang: Lang) -> Result<Value, ApiError>;
}
