//! Dialogue orchestration: one entry point per user action.
//!
//! `process_turn` handles free-text input; `show_symptoms` and
//! `select_subtype` handle the two follow-up actions of the rare-disease
//! branch. All three are infallible by contract: every downstream failure
//! has already been mapped to a fixed localized string by the client that
//! owns it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, info};

use crate::i18n::{texts, Lang};
use crate::pipeline::embedding::EmbeddingModel;
use crate::pipeline::extract::extract_disease_term;
use crate::pipeline::faq::client::FaqClient;
use crate::pipeline::intent::{is_form_exception, is_personal_disclosure};
use crate::pipeline::llm::LlmGenerate;
use crate::pipeline::orphadata::lookup::lookup;
use crate::pipeline::orphadata::phenotypes::{bucket, phenotypes, render};
use crate::pipeline::orphadata::subtypes::{resolve_subtypes, SubtypeOutcome};
use crate::pipeline::orphadata::OrphadataApi;
use crate::pipeline::translate::Translate;
use crate::session::{Mode, Reply, SessionContext};

/// Passages retrieved per FAQ answer.
const TOP_K: usize = 2;

/// The code marker embedded in formatted disease summaries.
static ORPHA_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ORPHAcode:\s*(\d+)").unwrap());

pub struct Orchestrator<'a, A, T, G, E>
where
    A: OrphadataApi,
    T: Translate,
    G: LlmGenerate,
    E: EmbeddingModel,
{
    api: &'a A,
    translator: &'a T,
    faq: FaqClient<'a, G, E>,
    form_url: String,
    support_email: String,
}

impl<'a, A, T, G, E> Orchestrator<'a, A, T, G, E>
where
    A: OrphadataApi,
    T: Translate,
    G: LlmGenerate,
    E: EmbeddingModel,
{
    pub fn new(
        api: &'a A,
        translator: &'a T,
        faq: FaqClient<'a, G, E>,
        form_url: &str,
        support_email: &str,
    ) -> Self {
        Self {
            api,
            translator,
            faq,
            form_url: form_url.to_string(),
            support_email: support_email.to_string(),
        }
    }

    /// Handle one free-text user turn. Priority order: form-completion
    /// exception, personal-medical disclosure, then the active mode.
    pub fn process_turn(&self, session: &mut SessionContext, input: &str) -> Vec<Reply> {
        session.push_user(input);
        let lang = session.lang();

        let replies = if is_form_exception(lang, input) {
            info!(session = %session.id, "form-completion exception, routing to FAQ");
            vec![self.faq_reply(lang, input)]
        } else if is_personal_disclosure(lang, input) {
            info!(session = %session.id, "personal medical disclosure detected");
            let t = texts(lang);
            vec![
                Reply::text(t.med_response),
                Reply::link(t.form_btn, &self.form_url),
                Reply::link(t.support_btn, format!("mailto:{}", self.support_email)),
            ]
        } else {
            match session.mode {
                Some(Mode::Rare) => vec![self.rare_reply(session, input)],
                Some(Mode::Service) => vec![self.faq_reply(lang, input)],
                None => vec![Reply::text(texts(lang).select_mode_prompt)],
            }
        };

        self.record(session, &replies);
        replies
    }

    /// Show the phenotypes for the last resolved disease code. When the
    /// disease itself carries none, fall back to offering its subtypes.
    pub fn show_symptoms(&self, session: &mut SessionContext) -> Vec<Reply> {
        let lang = session.lang();
        let Some(code) = session.last_code.clone() else {
            return vec![Reply::text(texts(lang).no_info_response)];
        };

        let entries = phenotypes(self.api, &code, lang);
        let replies = if entries.is_empty() {
            match resolve_subtypes(self.api, self.translator, &code, lang) {
                SubtypeOutcome::NoSubtypes => {
                    vec![Reply::text(texts(lang).no_subtypes_found)]
                }
                SubtypeOutcome::Choices(map) => {
                    let list = map
                        .names()
                        .map(|n| format!("- {n}"))
                        .collect::<Vec<_>>()
                        .join("\n");
                    session.subtype_map = Some(map);
                    vec![
                        Reply::text(texts(lang).select_subtype_prompt),
                        Reply::text(list),
                    ]
                }
            }
        } else {
            render(&bucket(entries), self.translator, lang)
        };

        self.record(session, &replies);
        replies
    }

    /// Resolve a subtype the user picked from the offered list. An unknown
    /// choice keeps the pending map and repeats the prompt.
    pub fn select_subtype(&self, session: &mut SessionContext, choice: &str) -> Vec<Reply> {
        let lang = session.lang();
        let Some(map) = session.subtype_map.as_ref() else {
            return vec![Reply::text(texts(lang).select_subtype_prompt)];
        };

        let replies = match map.get(choice) {
            Some(code) => {
                let code = code.to_string();
                session.subtype_map = None;
                session.last_code = Some(code.clone());
                let entries = phenotypes(self.api, &code, lang);
                render(&bucket(entries), self.translator, lang)
            }
            None => {
                let list = map
                    .names()
                    .map(|n| format!("- {n}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                vec![
                    Reply::text(texts(lang).select_subtype_prompt),
                    Reply::text(list),
                ]
            }
        };

        self.record(session, &replies);
        replies
    }

    /// Rare-disease branch: extract the disease name, look it up in English
    /// and carry the resolved code into the session.
    fn rare_reply(&self, session: &mut SessionContext, input: &str) -> Reply {
        let lang = session.lang();
        let term = extract_disease_term(input, lang);
        session.last_disease_name = Some(term.clone());

        let english_term = if lang == Lang::En {
            term
        } else {
            self.translator.translate_term(&term, Lang::En)
        };

        let response = lookup(self.api, &english_term, lang);

        session.last_code = ORPHA_CODE_RE
            .captures(&response)
            .map(|caps| caps[1].to_string());

        // Fallback strings come out of lookup() already localized; only a
        // formatted record needs translating.
        let response = if lang != Lang::En && response.contains("ORPHAcode:") {
            self.translator.translate_text(&response, lang)
        } else {
            response
        };

        Reply::text(response)
    }

    fn faq_reply(&self, lang: Lang, question: &str) -> Reply {
        match self.faq.answer(question, lang, None, TOP_K) {
            Ok(result) => Reply::text(result.answer),
            Err(e) => {
                error!(error = %e, "FAQ answer failed");
                Reply::text(texts(lang).no_info_response)
            }
        }
    }

    fn record(&self, session: &mut SessionContext, replies: &[Reply]) {
        for reply in replies {
            if let Reply::Text(text) = reply {
                session.push_assistant(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::embedding::MockEmbedder;
    use crate::pipeline::faq::store::FaqStore;
    use crate::pipeline::llm::MockLlm;
    use crate::pipeline::orphadata::client::MockOrphadata;
    use crate::pipeline::translate::IdentityTranslator;
    use serde_json::json;

    const FORM_URL: &str = "https://example.org/form";
    const SUPPORT: &str = "support@example.org";

    struct Fixture {
        api: MockOrphadata,
        translator: IdentityTranslator,
        llm: MockLlm,
        embedder: MockEmbedder,
        store: FaqStore,
    }

    impl Fixture {
        fn new(api: MockOrphadata, llm: MockLlm) -> Self {
            let embedder = MockEmbedder::new();
            let store = FaqStore::open_memory().unwrap();
            store
                .ingest_document(
                    "service.md",
                    "The form takes ten minutes.\n\nSupport answers within two days.",
                    Lang::En,
                    None,
                    &embedder,
                )
                .unwrap();
            Self {
                api,
                translator: IdentityTranslator,
                llm,
                embedder,
                store,
            }
        }

        fn orchestrator(&self) -> Orchestrator<'_, MockOrphadata, IdentityTranslator, MockLlm, MockEmbedder> {
            Orchestrator::new(
                &self.api,
                &self.translator,
                FaqClient::new(&self.store, &self.llm, &self.embedder),
                FORM_URL,
                SUPPORT,
            )
        }
    }

    fn fabry_api() -> MockOrphadata {
        MockOrphadata::new().with_name_result(
            "Fabry Disease",
            json!({"data": {"results": {
                "Preferred term": "Fabry disease",
                "ORPHAcode": 324,
                "OrphanetURL": "https://www.orpha.net/en/disease/detail/324",
                "Synonym": ["Anderson-Fabry disease"],
                "SummaryInformation": [{"Definition": "A lysosomal storage disease."}]
            }}}),
        )
    }

    fn text_of(reply: &Reply) -> &str {
        match reply {
            Reply::Text(t) => t,
            Reply::Link { .. } => panic!("expected text reply"),
        }
    }

    #[test]
    fn no_mode_prompts_for_mode_selection() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);

        let replies = orchestrator.process_turn(&mut session, "hello");
        assert_eq!(replies, vec![Reply::text("Please select a mode first.")]);
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn personal_disclosure_yields_disclaimer_and_both_links() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);

        let replies = orchestrator.process_turn(&mut session, "I have fever and chills");
        assert_eq!(replies.len(), 3);
        assert_eq!(text_of(&replies[0]), texts(Lang::En).med_response);
        assert_eq!(
            replies[1],
            Reply::link(texts(Lang::En).form_btn, FORM_URL)
        );
        assert_eq!(
            replies[2],
            Reply::link(texts(Lang::En).support_btn, format!("mailto:{SUPPORT}"))
        );
    }

    #[test]
    fn form_exception_routes_to_faq_even_in_rare_mode() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("Thanks, we received it."));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);

        let replies = orchestrator.process_turn(&mut session, "I have filled out the form");
        assert_eq!(replies, vec![Reply::text("Thanks, we received it.")]);
    }

    #[test]
    fn rare_mode_resolves_code_and_formats_record() {
        let fixture = Fixture::new(fabry_api(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);

        let replies = orchestrator.process_turn(&mut session, "Tell me about Fabry Disease");
        assert_eq!(replies.len(), 1);
        assert!(text_of(&replies[0]).contains("ORPHAcode: 324"));
        assert_eq!(session.last_code.as_deref(), Some("324"));
        assert_eq!(session.last_disease_name.as_deref(), Some("Fabry Disease"));
    }

    #[test]
    fn rare_mode_unknown_disease_keeps_code_unset() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);

        let replies = orchestrator.process_turn(&mut session, "Tell me about Nothing Disease");
        assert_eq!(
            replies,
            vec![Reply::text(texts(Lang::En).no_info_disease)]
        );
        assert_eq!(session.last_code, None);
    }

    #[test]
    fn service_mode_answers_from_faq() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("About ten minutes."));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Service);

        let replies = orchestrator.process_turn(&mut session, "How long does the form take?");
        assert_eq!(replies, vec![Reply::text("About ten minutes.")]);
    }

    #[test]
    fn service_mode_generation_failure_falls_back() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::failing_times("unused", 5));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Service);

        let replies = orchestrator.process_turn(&mut session, "How long does the form take?");
        assert_eq!(
            replies,
            vec![Reply::text(texts(Lang::En).no_info_response)]
        );
    }

    #[test]
    fn show_symptoms_without_code_says_no_info() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);

        let replies = orchestrator.show_symptoms(&mut session);
        assert_eq!(
            replies,
            vec![Reply::text(texts(Lang::En).no_info_response)]
        );
    }

    #[test]
    fn show_symptoms_renders_summary_and_groups() {
        let api = fabry_api().with_phenotypes(
            "324",
            json!({"data": {"results": {"Disorder": {"HPODisorderAssociation": [
                {"HPO": {"HPOId": "HP:0002076", "HPOTerm": "Migraine"},
                 "HPOFrequency": "Very frequent (99-80%)"}
            ]}}}}),
        );
        let fixture = Fixture::new(api, MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);
        orchestrator.process_turn(&mut session, "Tell me about Fabry Disease");

        let replies = orchestrator.show_symptoms(&mut session);
        assert_eq!(replies.len(), 4);
        assert!(text_of(&replies[0]).contains("1 very frequent"));
        assert!(text_of(&replies[1]).contains("- Migraine (HP:0002076)"));
    }

    #[test]
    fn show_symptoms_without_phenotypes_offers_subtypes() {
        let api = fabry_api()
            .with_children("324", json!({"data": {"results": [{"childs": [641]}]}}))
            .with_code_result("641", json!({"data": {"results": {"Name": "Cardiac variant"}}}));
        let fixture = Fixture::new(api, MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);
        orchestrator.process_turn(&mut session, "Tell me about Fabry Disease");

        let replies = orchestrator.show_symptoms(&mut session);
        assert_eq!(replies.len(), 2);
        assert_eq!(text_of(&replies[0]), texts(Lang::En).select_subtype_prompt);
        assert_eq!(text_of(&replies[1]), "- Cardiac variant");
        assert!(session.subtype_map.is_some());
    }

    #[test]
    fn show_symptoms_with_no_children_reports_no_subtypes() {
        let api = fabry_api()
            .with_children("324", json!({"data": {"results": [{"childs": []}]}}));
        let fixture = Fixture::new(api, MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);
        orchestrator.process_turn(&mut session, "Tell me about Fabry Disease");

        let replies = orchestrator.show_symptoms(&mut session);
        assert_eq!(
            replies,
            vec![Reply::text(texts(Lang::En).no_subtypes_found)]
        );
        assert!(session.subtype_map.is_none());
    }

    #[test]
    fn select_subtype_consumes_map_and_shows_its_symptoms() {
        let api = fabry_api()
            .with_children("324", json!({"data": {"results": [{"childs": [641]}]}}))
            .with_code_result("641", json!({"data": {"results": {"Name": "Cardiac variant"}}}))
            .with_phenotypes(
                "641",
                json!({"data": {"results": {"Disorder": {"HPODisorderAssociation": [
                    {"HPO": {"HPOId": "HP:0001639", "HPOTerm": "Hypertrophic cardiomyopathy"},
                     "HPOFrequency": "Frequent (79-30%)"}
                ]}}}}),
            );
        let fixture = Fixture::new(api, MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);
        orchestrator.process_turn(&mut session, "Tell me about Fabry Disease");
        orchestrator.show_symptoms(&mut session);

        let replies = orchestrator.select_subtype(&mut session, "Cardiac variant");
        assert_eq!(replies.len(), 4);
        assert!(text_of(&replies[2]).contains("Hypertrophic cardiomyopathy"));
        assert!(session.subtype_map.is_none());
        assert_eq!(session.last_code.as_deref(), Some("641"));
    }

    #[test]
    fn select_subtype_unknown_choice_repeats_the_prompt() {
        let api = fabry_api()
            .with_children("324", json!({"data": {"results": [{"childs": [641]}]}}))
            .with_code_result("641", json!({"data": {"results": {"Name": "Cardiac variant"}}}));
        let fixture = Fixture::new(api, MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);
        orchestrator.process_turn(&mut session, "Tell me about Fabry Disease");
        orchestrator.show_symptoms(&mut session);

        let replies = orchestrator.select_subtype(&mut session, "Renal variant");
        assert_eq!(text_of(&replies[0]), texts(Lang::En).select_subtype_prompt);
        assert_eq!(text_of(&replies[1]), "- Cardiac variant");
        assert!(session.subtype_map.is_some());
    }

    #[test]
    fn select_subtype_without_pending_map_prompts() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::En);

        let replies = orchestrator.select_subtype(&mut session, "anything");
        assert_eq!(
            replies,
            vec![Reply::text(texts(Lang::En).select_subtype_prompt)]
        );
    }

    #[test]
    fn localized_session_uses_localized_prompts() {
        let fixture = Fixture::new(MockOrphadata::new(), MockLlm::new("unused"));
        let orchestrator = fixture.orchestrator();
        let mut session = SessionContext::new(Lang::De);

        let replies = orchestrator.process_turn(&mut session, "hallo");
        assert_eq!(replies, vec![Reply::text("Wähle bitte zuerst einen Modus aus.")]);
    }
}
