//! Disease-term extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

use crate::i18n::Lang;

static TERM_DE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b[A-ZÄÖÜ][\wäöüß-]+(?:-(?:Krankheit|Erkrankung)|\s+(?:Krankheit|Erkrankung|Angioödem))\b",
    )
    .unwrap()
});

static TERM_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Z][\w-]+\s+Disease\b|(?i)\b[A-Z][\w-]*angioedema\b").unwrap()
});

static TERM_PL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-ZŁŻŹÓĄĘĆŃ][\wąćęłńóśźż-]+\s+Choroba\b").unwrap()
});

static TERM_ES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-ZÁÉÍÓÚÜÑ][\wáéíóúñü-]+\s+Enfermedad\b").unwrap()
});

static TERM_PT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-ZÁÉÍÓÚÃÕÇ][\wáéíóúãõç-]+\s+Doença\b").unwrap()
});

fn pattern_for(lang: Lang) -> &'static Regex {
    match lang {
        Lang::De => &TERM_DE,
        Lang::En => &TERM_EN,
        Lang::Pl => &TERM_PL,
        Lang::Es => &TERM_ES,
        Lang::Pt => &TERM_PT,
    }
}

/// Find the first disease name in `query` using the language-specific
/// pattern: a capitalized token followed by the disease-indicating suffix
/// word (or the English angioedema variant). If nothing matches, the whole
/// query is returned unchanged — extraction is fail-open and never errors.
pub fn extract_disease_term(query: &str, lang: Lang) -> String {
    match pattern_for(lang).find(query) {
        Some(m) => m.as_str().to_string(),
        None => query.to_string(),
    }
}
