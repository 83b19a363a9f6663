//! Rare-disease lookup by name against the cross-referencing endpoint.
//!
//! The contract is string-in, string-out: every failure mode maps to one of
//! the fixed per-language fallback messages and nothing ever propagates to
//! the orchestrator. The formatted response embeds the `ORPHAcode: <digits>`
//! marker the orchestrator parses to carry the code into phenotype lookup.

use serde::Deserialize;
use tracing::debug;

use crate::i18n::{texts, Lang};

use super::OrphadataApi;

/// Normalized view of one cross-referencing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRecord {
    pub preferred_term: String,
    pub code: Option<String>,
    pub url: String,
    pub synonyms: Vec<String>,
    pub definition: String,
}

/// `data.results` arrives either as a single object or as a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(RawRecord),
    Many(Vec<RawRecord>),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: DataSection,
}

#[derive(Deserialize, Default)]
struct DataSection {
    results: Option<OneOrMany>,
}

/// ORPHAcodes show up as numbers or strings depending on the endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrphaCode {
    Num(u64),
    Text(String),
}

impl OrphaCode {
    fn into_string(self) -> String {
        match self {
            OrphaCode::Num(n) => n.to_string(),
            OrphaCode::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "Preferred term")]
    preferred_term: Option<String>,
    #[serde(rename = "ORPHAcode")]
    code: Option<OrphaCode>,
    #[serde(rename = "OrphanetURL")]
    url: Option<String>,
    #[serde(rename = "Synonym")]
    synonyms: Option<Vec<String>>,
    #[serde(rename = "SummaryInformation")]
    summary_information: Option<Vec<SummaryInformation>>,
}

#[derive(Deserialize)]
struct SummaryInformation {
    #[serde(rename = "Definition")]
    definition: Option<String>,
}

impl From<RawRecord> for DiseaseRecord {
    fn from(raw: RawRecord) -> Self {
        let definition = raw
            .summary_information
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|s| s.definition)
            .unwrap_or_default();

        DiseaseRecord {
            preferred_term: raw.preferred_term.unwrap_or_else(|| "-".to_string()),
            code: raw.code.map(OrphaCode::into_string),
            url: raw.url.unwrap_or_default(),
            synonyms: raw.synonyms.unwrap_or_default(),
            definition,
        }
    }
}

/// Render the fixed four-line template. Labels stay English; the
/// orchestrator translates the whole response for non-English sessions
/// after extracting the code from the marker.
pub fn format_record(record: &DiseaseRecord) -> String {
    format!(
        "**{}** (ORPHAcode: {})\nDefinition: {}\nSynonyms: {}\nMore info: {}",
        record.preferred_term,
        record.code.as_deref().unwrap_or("-"),
        record.definition,
        record.synonyms.join(", "),
        record.url,
    )
}

/// Look up a disease by (partial) name and format a textual summary.
///
/// Timeout / connection failure / 5xx / malformed body → "service
/// unavailable"; 4xx or an absent, wrong-typed or empty result set → "no
/// information found". A first record carrying neither a preferred term nor
/// a code counts as empty too. Both messages are localized.
pub fn lookup(api: &impl OrphadataApi, name: &str, lang: Lang) -> String {
    let t = texts(lang);

    let body = match api.cross_reference_by_name(name, lang) {
        Ok(body) => body,
        Err(e) if e.is_client_error() => {
            debug!(name, error = %e, "cross-reference lookup: no result");
            return t.no_info_disease.to_string();
        }
        Err(e) => {
            debug!(name, error = %e, "cross-reference lookup failed");
            return t.service_unavailable.to_string();
        }
    };

    let envelope: Envelope = match serde_json::from_value(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!(name, error = %e, "cross-reference result shape unexpected");
            return t.no_info_disease.to_string();
        }
    };

    let records: Vec<RawRecord> = match envelope.data.results {
        Some(OneOrMany::One(record)) => vec![record],
        Some(OneOrMany::Many(records)) => records,
        None => return t.no_info_disease.to_string(),
    };

    match records.into_iter().next() {
        // An object with neither a name nor a code identifies nothing.
        Some(first) if first.preferred_term.is_some() || first.code.is_some() => {
            format_record(&DiseaseRecord::from(first))
        }
        _ => t.no_info_disease.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::orphadata::client::MockOrphadata;
    use crate::pipeline::orphadata::ApiError;
    use serde_json::json;

    fn fabry_payload() -> serde_json::Value {
        json!({
            "data": {
                "results": {
                    "Preferred term": "Fabry disease",
                    "ORPHAcode": 324,
                    "OrphanetURL": "https://www.orpha.net/en/disease/detail/324",
                    "Synonym": ["Anderson-Fabry disease", "Alpha-galactosidase A deficiency"],
                    "SummaryInformation": [
                        {"Definition": "A rare genetic lysosomal storage disease."}
                    ]
                }
            }
        })
    }

    #[test]
    fn formats_known_record_exactly() {
        let record = DiseaseRecord {
            preferred_term: "Example Disease".to_string(),
            code: Some("123".to_string()),
            url: "http://x".to_string(),
            synonyms: vec!["A".to_string(), "B".to_string()],
            definition: "D".to_string(),
        };
        assert_eq!(
            format_record(&record),
            "**Example Disease** (ORPHAcode: 123)\nDefinition: D\nSynonyms: A, B\nMore info: http://x"
        );
    }

    #[test]
    fn single_object_result_is_accepted() {
        let api = MockOrphadata::new().with_name_result("Fabry disease", fabry_payload());
        let out = lookup(&api, "Fabry disease", Lang::En);
        assert!(out.starts_with("**Fabry disease** (ORPHAcode: 324)"));
        assert!(out.contains("Anderson-Fabry disease, Alpha-galactosidase A deficiency"));
    }

    #[test]
    fn list_result_takes_first_entry() {
        let api = MockOrphadata::new().with_name_result(
            "Gaucher",
            json!({"data": {"results": [
                {"Preferred term": "Gaucher disease", "ORPHAcode": "355", "OrphanetURL": "u"},
                {"Preferred term": "Other", "ORPHAcode": 1}
            ]}}),
        );
        let out = lookup(&api, "Gaucher", Lang::En);
        assert!(out.starts_with("**Gaucher disease** (ORPHAcode: 355)"));
    }

    #[test]
    fn malformed_result_shapes_yield_no_info() {
        let shapes = [
            json!({"data": {"results": null}}),
            json!({"data": {"results": []}}),
            json!({"data": {"results": {}}}),
            json!({"data": {"results": [{}]}}),
            json!({"data": {"results": 42}}),
            json!({"data": {"results": "oops"}}),
            json!({"data": {}}),
            json!({}),
        ];
        for shape in shapes {
            let api = MockOrphadata::new().with_name_result("X", shape.clone());
            assert_eq!(
                lookup(&api, "X", Lang::En),
                texts(Lang::En).no_info_disease,
                "shape: {shape}"
            );
        }
    }

    #[test]
    fn no_info_is_localized() {
        let api = MockOrphadata::new().with_name_error("X", ApiError::Status(404));
        assert_eq!(
            lookup(&api, "X", Lang::De),
            "Keine Informationen zur angefragten Erkrankung gefunden."
        );
        assert_eq!(lookup(&api, "X", Lang::Pl), "Brak informacji o tej chorobie.");
    }

    #[test]
    fn server_error_yields_service_unavailable() {
        let api = MockOrphadata::new().with_name_error("X", ApiError::Status(500));
        assert_eq!(
            lookup(&api, "X", Lang::En),
            "The service is currently unavailable. Please try again later."
        );
    }

    #[test]
    fn timeout_and_connect_yield_service_unavailable() {
        for err in [ApiError::Timeout(5), ApiError::Connect("refused".into())] {
            let api = MockOrphadata::new().with_name_error("X", err);
            assert_eq!(
                lookup(&api, "X", Lang::En),
                texts(Lang::En).service_unavailable
            );
        }
    }

    #[test]
    fn parse_error_yields_service_unavailable() {
        let api = MockOrphadata::new().with_name_error("X", ApiError::Parse("bad json".into()));
        assert_eq!(
            lookup(&api, "X", Lang::En),
            texts(Lang::En).service_unavailable
        );
    }

    #[test]
    fn empty_object_result_yields_no_info() {
        let api = MockOrphadata::new()
            .with_name_result("Sparse", json!({"data": {"results": {}}}));
        assert_eq!(
            lookup(&api, "Sparse", Lang::En),
            texts(Lang::En).no_info_disease
        );
    }

    #[test]
    fn identified_record_keeps_placeholders_for_missing_fields() {
        let api = MockOrphadata::new().with_name_result(
            "Sparse",
            json!({"data": {"results": {"Preferred term": "Sparse disease"}}}),
        );
        assert_eq!(
            lookup(&api, "Sparse", Lang::En),
            "**Sparse disease** (ORPHAcode: -)\nDefinition: \nSynonyms: \nMore info: "
        );
    }
}
