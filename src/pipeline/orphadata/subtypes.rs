//! Disease subtype resolution via the classification hierarchy.
//!
//! When a disease has no phenotypes of its own, its child codes often do.
//! This module collects the child codes from the classification endpoint,
//! resolves each to a display name and hands the orchestrator a name-to-code
//! map the user can choose from.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::i18n::Lang;
use crate::pipeline::translate::Translate;

use super::OrphadataApi;

/// Ordered name-to-code map of the subtypes offered to the user. Insertion
/// order is display order; inserting an existing name replaces its code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtypeMap(Vec<(String, String)>);

impl SubtypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, code: String) {
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = code;
        } else {
            self.0.push((name, code));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| code.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a subtype resolution pass.
#[derive(Debug)]
pub enum SubtypeOutcome {
    /// The classification endpoint reports no child codes.
    NoSubtypes,
    /// At least one child code resolved; the map is never empty.
    Choices(SubtypeMap),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: DataSection,
}

#[derive(Deserialize, Default)]
struct DataSection {
    results: Option<Vec<Group>>,
}

#[derive(Deserialize)]
struct Group {
    #[serde(default)]
    childs: Vec<ChildCode>,
}

/// Child codes show up as numbers or strings depending on the dataset.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChildCode {
    Num(u64),
    Text(String),
}

impl ChildCode {
    fn into_string(self) -> String {
        match self {
            ChildCode::Num(n) => n.to_string(),
            ChildCode::Text(s) => s,
        }
    }
}

/// Collect the union of child codes across all classification groups,
/// deduplicated in encounter order.
fn child_codes(api: &impl OrphadataApi, code: &str, lang: Lang) -> Vec<String> {
    let body = match api.child_code_groups(code, lang) {
        Ok(body) => body,
        Err(e) => {
            debug!(code, error = %e, "child code lookup failed");
            return Vec::new();
        }
    };

    let envelope: Envelope = match serde_json::from_value(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!(code, error = %e, "child code result shape unexpected");
            return Vec::new();
        }
    };

    let mut codes = Vec::new();
    for group in envelope.data.results.unwrap_or_default() {
        for child in group.childs {
            let child = child.into_string();
            if !codes.contains(&child) {
                codes.push(child);
            }
        }
    }
    codes
}

/// Pull a display name out of a cross-referencing body, trying the name
/// keys the datasets use in turn.
fn name_from_body(body: &Value) -> Option<String> {
    let results = body.get("data")?.get("results")?;
    let record = match results {
        Value::Array(items) => items.first()?,
        other => other,
    };
    for key in ["Name", "preferredTerm", "Preferred term"] {
        if let Some(name) = record.get(key).and_then(Value::as_str) {
            return Some(name.to_string());
        }
    }
    None
}

/// Resolve the subtypes of a disease code. Each child code is looked up for
/// its preferred name; a child whose lookup fails or carries no name keeps
/// its numeric code as the display name. Names are translated into the
/// session language (skipped for English).
pub fn resolve_subtypes(
    api: &impl OrphadataApi,
    translator: &impl Translate,
    code: &str,
    lang: Lang,
) -> SubtypeOutcome {
    let codes = child_codes(api, code, lang);
    if codes.is_empty() {
        return SubtypeOutcome::NoSubtypes;
    }

    let mut map = SubtypeMap::new();
    for child in codes {
        let name = match api.cross_reference_by_code(&child, Lang::En) {
            Ok(body) => name_from_body(&body),
            Err(e) => {
                debug!(code = %child, error = %e, "subtype name lookup failed");
                None
            }
        };
        let name = match name {
            Some(name) => {
                if lang == Lang::En {
                    name
                } else {
                    translator.translate_text(&name, lang)
                }
            }
            None => {
                warn!(code = %child, "no name found for subtype, showing the code itself");
                child.clone()
            }
        };
        map.insert(name, child);
    }

    SubtypeOutcome::Choices(map)
}
