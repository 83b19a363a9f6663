//! Conversation pipeline: intent detection, extraction, translation, the
//! two retrieval branches and the orchestrator that wires them together.

pub mod embedding;
pub mod extract;
pub mod faq;
pub mod intent;
pub mod llm;
pub mod orchestrator;
pub mod orphadata;
pub mod translate;
