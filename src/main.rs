//! Interactive terminal front end for the Savie assistant.

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use savie::config::{default_log_filter, AssistantConfig, APP_NAME, APP_VERSION};
use savie::i18n::{texts, ALL_LANGS};
use savie::pipeline::faq::store::FaqStore;
use savie::pipeline::llm::OllamaClient;
use savie::pipeline::orphadata::client::OrphadataClient;
use savie::pipeline::translate::LlmTranslator;
use savie::pipeline::{embedding::OllamaEmbedder, faq::client::FaqClient};
use savie::{Lang, Mode, Orchestrator, Reply, SessionContext};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .init();

    let config = AssistantConfig::from_env();
    tracing::info!(version = APP_VERSION, "starting {APP_NAME}");

    let store = match FaqStore::open(&config.faq_index_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("cannot open FAQ index {}: {e}", config.faq_index_path.display());
            std::process::exit(1);
        }
    };

    let api = OrphadataClient::new(&config.orphadata_base_url, config.api_timeout_secs);
    let llm = OllamaClient::new(
        &config.ollama_base_url,
        &config.generation_model,
        config.llm_timeout_secs,
    );
    let embedder = OllamaEmbedder::new(
        &config.ollama_base_url,
        &config.embedding_model,
        config.llm_timeout_secs,
        config.embedding_dimension,
    );
    let translator = LlmTranslator::new(&llm);
    let faq = FaqClient::new(&store, &llm, &embedder);
    let orchestrator = Orchestrator::new(
        &api,
        &translator,
        faq,
        &config.form_url,
        &config.support_email,
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let lang = prompt_language(&mut lines);
    let mut session = SessionContext::new(lang);

    let t = texts(lang);
    println!("{}", t.welcome_title);
    println!("[1] {}  [2] {}", t.service_button, t.rare_button);
    println!("commands: :service :rare :symptoms :subtype <name> :quit");

    loop {
        print!("> ");
        io::stdout().flush().ok();
        let Some(Ok(line)) = lines.next() else { break };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let replies = match input {
            ":quit" => break,
            ":service" | "1" => {
                session.set_mode(Mode::Service);
                vec![Reply::text(t.service_button)]
            }
            ":rare" | "2" => {
                session.set_mode(Mode::Rare);
                vec![Reply::text(t.rare_button)]
            }
            ":symptoms" => orchestrator.show_symptoms(&mut session),
            _ => {
                if let Some(choice) = input.strip_prefix(":subtype ") {
                    orchestrator.select_subtype(&mut session, choice.trim())
                } else {
                    orchestrator.process_turn(&mut session, input)
                }
            }
        };

        for reply in replies {
            match reply {
                Reply::Text(text) => println!("{text}"),
                Reply::Link { label, url } => println!("{label} -> {url}"),
            }
        }
    }
}

fn prompt_language(lines: &mut impl Iterator<Item = io::Result<String>>) -> Lang {
    println!("Select a language:");
    for lang in ALL_LANGS {
        println!("  {} - {}", lang.code(), lang.native_name());
    }
    print!("> ");
    io::stdout().flush().ok();

    match lines.next() {
        Some(Ok(line)) => Lang::from_code_lossy(line.trim()),
        _ => Lang::En,
    }
}
