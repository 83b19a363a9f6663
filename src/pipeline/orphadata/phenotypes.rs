//! HPO phenotype lookup, frequency bucketing and rendering.

use serde::Deserialize;
use tracing::debug;

use crate::i18n::{texts, Lang};
use crate::pipeline::translate::Translate;
use crate::session::Reply;

use super::OrphadataApi;

/// One symptom association for a disease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhenotypeEntry {
    pub hpo_id: String,
    pub term: String,
    /// Raw frequency label, e.g. "Very frequent (99-80%)".
    pub frequency: String,
}

/// Qualitative frequency category, inferred from the raw label by
/// substring match; anything that is neither "very frequent" nor
/// "occasional" counts as frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    VeryFrequent,
    Frequent,
    Occasional,
}

impl Frequency {
    pub fn from_label(label: &str) -> Frequency {
        let lower = label.to_lowercase();
        if lower.contains("very frequent") {
            Frequency::VeryFrequent
        } else if lower.contains("occasional") {
            Frequency::Occasional
        } else {
            Frequency::Frequent
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        let t = texts(lang);
        match self {
            Frequency::VeryFrequent => t.freq_very_frequent,
            Frequency::Frequent => t.freq_frequent,
            Frequency::Occasional => t.freq_occasional,
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: DataSection,
}

#[derive(Deserialize, Default)]
struct DataSection {
    results: Option<Results>,
}

#[derive(Deserialize)]
struct Results {
    #[serde(rename = "Disorder")]
    disorder: Option<Disorder>,
}

#[derive(Deserialize)]
struct Disorder {
    #[serde(rename = "HPODisorderAssociation", default)]
    associations: Vec<Association>,
}

#[derive(Deserialize)]
struct Association {
    #[serde(rename = "HPO")]
    hpo: Option<Hpo>,
    #[serde(rename = "HPOFrequency")]
    frequency: Option<String>,
}

#[derive(Deserialize)]
struct Hpo {
    #[serde(rename = "HPOId")]
    id: Option<String>,
    #[serde(rename = "HPOTerm")]
    term: Option<String>,
}

/// Fetch the phenotypes for a disease code. Never errors: any transport
/// failure, non-200 status or unexpected shape yields an empty list.
/// Associations missing id, term or frequency are silently dropped.
pub fn phenotypes(api: &impl OrphadataApi, code: &str, lang: Lang) -> Vec<PhenotypeEntry> {
    let body = match api.phenotypes(code, lang) {
        Ok(body) => body,
        Err(e) => {
            debug!(code, error = %e, "phenotype lookup failed");
            return Vec::new();
        }
    };

    let envelope: Envelope = match serde_json::from_value(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!(code, error = %e, "phenotype result shape unexpected");
            return Vec::new();
        }
    };

    let associations = envelope
        .data
        .results
        .and_then(|r| r.disorder)
        .map(|d| d.associations)
        .unwrap_or_default();

    associations
        .into_iter()
        .filter_map(|assoc| {
            let hpo = assoc.hpo?;
            Some(PhenotypeEntry {
                hpo_id: hpo.id?,
                term: hpo.term?,
                frequency: assoc.frequency?,
            })
        })
        .collect()
}

/// Phenotypes grouped by frequency category, in display order.
#[derive(Debug, Default)]
pub struct SymptomBuckets {
    pub very_frequent: Vec<PhenotypeEntry>,
    pub frequent: Vec<PhenotypeEntry>,
    pub occasional: Vec<PhenotypeEntry>,
}

impl SymptomBuckets {
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.very_frequent.len(),
            self.frequent.len(),
            self.occasional.len(),
        )
    }
}

pub fn bucket(entries: Vec<PhenotypeEntry>) -> SymptomBuckets {
    let mut buckets = SymptomBuckets::default();
    for entry in entries {
        match Frequency::from_label(&entry.frequency) {
            Frequency::VeryFrequent => buckets.very_frequent.push(entry),
            Frequency::Occasional => buckets.occasional.push(entry),
            Frequency::Frequent => buckets.frequent.push(entry),
        }
    }
    buckets
}

/// The localized one-line summary with the three counts interpolated.
pub fn summary_sentence(buckets: &SymptomBuckets, lang: Lang) -> String {
    let (vf, f, o) = buckets.counts();
    texts(lang)
        .summary_symptoms
        .replace("{vf}", &vf.to_string())
        .replace("{f}", &f.to_string())
        .replace("{o}", &o.to_string())
}

/// Render the summary sentence plus the three labeled groups. Symptom names
/// are translated into the session language (skipped for English); an empty
/// group shows the "no information" line instead of an empty list.
pub fn render(
    buckets: &SymptomBuckets,
    translator: &impl Translate,
    lang: Lang,
) -> Vec<Reply> {
    let mut replies = vec![Reply::text(summary_sentence(buckets, lang))];

    let groups = [
        (Frequency::VeryFrequent, &buckets.very_frequent),
        (Frequency::Frequent, &buckets.frequent),
        (Frequency::Occasional, &buckets.occasional),
    ];

    for (frequency, entries) in groups {
        let mut block = format!("{} ({})\n", frequency.label(lang), entries.len());
        if entries.is_empty() {
            block.push_str(texts(lang).no_info_response);
        } else {
            let lines: Vec<String> = entries
                .iter()
                .map(|entry| {
                    let name = if lang == Lang::En {
                        entry.term.clone()
                    } else {
                        translator.translate_term(&entry.term, lang)
                    };
                    format!("- {} ({})", name, entry.hpo_id)
                })
                .collect();
            block.push_str(&lines.join("\n"));
        }
        replies.push(Reply::text(block));
    }

    replies
}
