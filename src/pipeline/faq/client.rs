//! Retrieval-augmented FAQ answering.

use tracing::debug;

use crate::i18n::{texts, Lang};
use crate::pipeline::embedding::EmbeddingModel;
use crate::pipeline::llm::LlmGenerate;

use super::store::FaqStore;
use super::FaqError;

/// Provenance of one passage that fed an answer.
#[derive(Debug, Clone)]
pub struct PassageMeta {
    pub document: String,
    pub language: String,
    pub category: Option<String>,
    pub score: f32,
}

/// A generated FAQ answer plus the passages it was grounded on.
#[derive(Debug, Clone)]
pub struct FaqResult {
    pub answer: String,
    pub sources: Vec<PassageMeta>,
}

/// Answers service questions from the indexed FAQ passages.
pub struct FaqClient<'a, G: LlmGenerate, E: EmbeddingModel> {
    store: &'a FaqStore,
    generator: &'a G,
    embedder: &'a E,
}

impl<'a, G: LlmGenerate, E: EmbeddingModel> FaqClient<'a, G, E> {
    pub fn new(store: &'a FaqStore, generator: &'a G, embedder: &'a E) -> Self {
        Self {
            store,
            generator,
            embedder,
        }
    }

    /// Retrieve the top-k passages for the question (restricted to the
    /// session language and, when given, a category) and generate an answer
    /// from them with the language's prompt template.
    pub fn answer(
        &self,
        question: &str,
        lang: Lang,
        category: Option<&str>,
        k: usize,
    ) -> Result<FaqResult, FaqError> {
        let query_embedding = self.embedder.embed(question).map_err(FaqError::Embedding)?;
        let passages = self
            .store
            .search(&query_embedding, Some(lang), category, k)?;
        debug!(
            question,
            hits = passages.len(),
            lang = %lang,
            "retrieved FAQ passages"
        );

        let context = passages
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let t = texts(lang);
        let prompt = format!(
            "{}\n\n({}: {}, {}: {})",
            t.faq_prompt
                .replace("{context}", &context)
                .replace("{question}", question),
            t.faq_category_label,
            category.unwrap_or(t.faq_all_categories),
            t.faq_language_label,
            lang.code(),
        );

        let answer = self
            .generator
            .generate("", &prompt)
            .map_err(FaqError::Generation)?;

        Ok(FaqResult {
            answer: answer.trim().to_string(),
            sources: passages
                .into_iter()
                .map(|p| PassageMeta {
                    document: p.document,
                    language: p.language,
                    category: p.category,
                    score: p.score,
                })
                .collect(),
        })
    }
}
