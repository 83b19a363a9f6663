//! Explicit per-conversation state.
//!
//! One `SessionContext` covers one conversation from language selection to
//! the end of interaction. The language is fixed at creation; switching mode
//! resets the resolved disease code and name.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::i18n::Lang;
use crate::pipeline::orphadata::subtypes::SubtypeMap;

/// Top-level dialogue branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// FAQ retrieval over the service documents.
    Service,
    /// Rare-disease lookup against Orphadata.
    Rare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// One chat message, immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: NaiveDateTime,
}

impl Message {
    fn new(role: Role, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.to_string(),
            timestamp: Local::now().naive_local(),
        }
    }
}

/// An assistant output unit. `Link` carries the rendering hint for the two
/// action affordances (form link, support contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Text(String),
    Link { label: String, url: String },
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Reply::Link {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// State for one conversation. Mutated only by the orchestrator.
#[derive(Debug)]
pub struct SessionContext {
    pub id: Uuid,
    lang: Lang,
    pub mode: Option<Mode>,
    pub history: Vec<Message>,
    pub last_code: Option<String>,
    pub last_disease_name: Option<String>,
    pub subtype_map: Option<SubtypeMap>,
}

impl SessionContext {
    /// Create a session. The language is immutable for the session lifetime.
    pub fn new(lang: Lang) -> Self {
        Self {
            id: Uuid::new_v4(),
            lang,
            mode: None,
            history: Vec::new(),
            last_code: None,
            last_disease_name: None,
            subtype_map: None,
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Switch mode. Resets the resolved disease code and name.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
        self.last_code = None;
        self.last_disease_name = None;
        self.subtype_map = None;
    }

    pub fn push_user(&mut self, text: &str) {
        self.history.push(Message::new(Role::User, text));
    }

    pub fn push_assistant(&mut self, text: &str) {
        self.history.push(Message::new(Role::Assistant, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_mode() {
        let session = SessionContext::new(Lang::De);
        assert_eq!(session.mode, None);
        assert_eq!(session.lang(), Lang::De);
        assert!(session.history.is_empty());
    }

    #[test]
    fn set_mode_resets_disease_state() {
        let mut session = SessionContext::new(Lang::En);
        session.set_mode(Mode::Rare);
        session.last_code = Some("324".to_string());
        session.last_disease_name = Some("Fabry Disease".to_string());

        session.set_mode(Mode::Service);
        assert_eq!(session.mode, Some(Mode::Service));
        assert_eq!(session.last_code, None);
        assert_eq!(session.last_disease_name, None);
    }

    #[test]
    fn history_preserves_order() {
        let mut session = SessionContext::new(Lang::En);
        session.push_user("hello");
        session.push_assistant("hi there");
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].role, Role::User);
        assert_eq!(session.history[1].role, Role::Assistant);
    }
}
