//! FAQ retrieval: persistent passage index plus retrieval-augmented answers.

pub mod client;
pub mod store;

use thiserror::Error;

use super::llm::LlmError;

#[derive(Error, Debug)]
pub enum FaqError {
    #[error("FAQ index error: {0}")]
    Index(#[from] rusqlite::Error),

    #[error("FAQ index directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("embedding failed: {0}")]
    Embedding(LlmError),

    #[error("answer generation failed: {0}")]
    Generation(LlmError),
}
