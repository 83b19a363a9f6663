//! Savie: a multilingual assistant for rare-disease information lookup and
//! service FAQ retrieval.
//!
//! The crate is organized around one dialogue [`pipeline`]: regex intent
//! detection routes each turn, the Orphadata clients answer rare-disease
//! questions and the FAQ client answers service questions from an indexed
//! passage store. All per-conversation state lives in
//! [`session::SessionContext`].

pub mod config;
pub mod i18n;
pub mod pipeline;
pub mod session;

pub use config::AssistantConfig;
pub use i18n::Lang;
pub use pipeline::orchestrator::Orchestrator;
pub use session::{Mode, Reply, SessionContext};
