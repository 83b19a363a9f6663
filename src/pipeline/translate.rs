//! Translation adapter over the completion client.
//!
//! Translation is best-effort by contract: a failed call is retried once,
//! and a second failure falls back to the original text so a flaky model
//! endpoint can never break a turn.

use tracing::warn;

use crate::i18n::Lang;

use super::llm::{LlmError, LlmGenerate};

const TRANSLATE_SYSTEM: &str =
    "You are a precise translation engine. Reply with the translation only.";

/// Translate a string or a single term between the supported languages.
pub trait Translate {
    fn translate_text(&self, text: &str, target: Lang) -> String;
    fn translate_term(&self, term: &str, target: Lang) -> String;
}

/// Completion-backed translator.
pub struct LlmTranslator<'a, G: LlmGenerate> {
    generator: &'a G,
}

impl<'a, G: LlmGenerate> LlmTranslator<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        Self { generator }
    }

    fn generate_with_retry(&self, prompt: &str, fallback: &str) -> String {
        match self.call(prompt) {
            Ok(out) => out,
            Err(first) => {
                warn!(error = %first, "translation call failed, retrying once");
                match self.call(prompt) {
                    Ok(out) => out,
                    Err(second) => {
                        warn!(error = %second, "translation retry failed, keeping original text");
                        fallback.to_string()
                    }
                }
            }
        }
    }

    fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let out = self.generator.generate(TRANSLATE_SYSTEM, prompt)?;
        Ok(out.trim().to_string())
    }
}

impl<G: LlmGenerate> Translate for LlmTranslator<'_, G> {
    fn translate_text(&self, text: &str, target: Lang) -> String {
        let prompt = format!(
            "Translate the following text into {}:\n\n{}",
            target.english_name(),
            text
        );
        self.generate_with_retry(&prompt, text)
    }

    fn translate_term(&self, term: &str, target: Lang) -> String {
        let prompt = format!(
            "Translate only the following single word or short phrase into {}, \
             without any explanations or examples:\n\n{}",
            target.english_name(),
            term
        );
        self.generate_with_retry(&prompt, term)
    }
}

/// Translator that returns its input unchanged. Used in tests and wherever
/// translation must be a no-op.
pub struct IdentityTranslator;

impl Translate for IdentityTranslator {
    fn translate_text(&self, text: &str, _target: Lang) -> String {
        text.to_string()
    }

    fn translate_term(&self, term: &str, _target: Lang) -> String {
        term.to_string()
    }
}
