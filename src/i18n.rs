//! Supported languages and the per-language text tables.
//!
//! Savie speaks five languages. Every user-facing string the pipeline can
//! produce lives here so clients and the orchestrator never hardcode copy.

use serde::{Deserialize, Serialize};

/// A supported session language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lang {
    De,
    En,
    Pl,
    Es,
    Pt,
}

pub const ALL_LANGS: [Lang; 5] = [Lang::De, Lang::En, Lang::Pl, Lang::Es, Lang::Pt];

impl Lang {
    /// Lowercase ISO code, e.g. "de".
    pub fn code(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
            Lang::Pl => "pl",
            Lang::Es => "es",
            Lang::Pt => "pt",
        }
    }

    /// Uppercase code as the Orphadata API expects, e.g. "DE".
    pub fn code_upper(self) -> &'static str {
        match self {
            Lang::De => "DE",
            Lang::En => "EN",
            Lang::Pl => "PL",
            Lang::Es => "ES",
            Lang::Pt => "PT",
        }
    }

    /// English language name, used in translation prompts.
    pub fn english_name(self) -> &'static str {
        match self {
            Lang::De => "German",
            Lang::En => "English",
            Lang::Pl => "Polish",
            Lang::Es => "Spanish",
            Lang::Pt => "Portuguese",
        }
    }

    /// Native name, used by the language selection prompt.
    pub fn native_name(self) -> &'static str {
        match self {
            Lang::De => "Deutsch",
            Lang::En => "English",
            Lang::Pl => "Polski",
            Lang::Es => "Español",
            Lang::Pt => "Português",
        }
    }

    /// Parse a lowercase ISO code.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "de" => Some(Lang::De),
            "en" => Some(Lang::En),
            "pl" => Some(Lang::Pl),
            "es" => Some(Lang::Es),
            "pt" => Some(Lang::Pt),
            _ => None,
        }
    }

    /// Parse a code, falling back to English for anything unknown.
    pub fn from_code_lossy(code: &str) -> Lang {
        Self::from_code(code).unwrap_or(Lang::En)
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Fixed per-language text templates.
///
/// `faq_prompt` carries `{context}` and `{question}` placeholders;
/// `summary_symptoms` carries `{vf}`, `{f}` and `{o}`.
pub struct Texts {
    pub welcome_title: &'static str,
    pub med_response: &'static str,
    pub form_btn: &'static str,
    pub support_btn: &'static str,
    pub faq_prompt: &'static str,
    pub faq_category_label: &'static str,
    pub faq_language_label: &'static str,
    pub faq_all_categories: &'static str,
    pub no_info_response: &'static str,
    pub no_info_disease: &'static str,
    pub service_unavailable: &'static str,
    pub no_subtypes_found: &'static str,
    pub select_subtype_prompt: &'static str,
    pub select_mode_prompt: &'static str,
    pub service_button: &'static str,
    pub rare_button: &'static str,
    pub freq_very_frequent: &'static str,
    pub freq_frequent: &'static str,
    pub freq_occasional: &'static str,
    pub summary_symptoms: &'static str,
}

/// Look up the text table for a language.
pub fn texts(lang: Lang) -> &'static Texts {
    match lang {
        Lang::De => &DE,
        Lang::En => &EN,
        Lang::Pl => &PL,
        Lang::Es => &ES,
        Lang::Pt => &PT,
    }
}

static DE: Texts = Texts {
    welcome_title: "Hi, ich bin Savie",
    med_response: "Ich kann dir bei medizinischen Einschätzungen leider nicht weiterhelfen. Du kannst unser medizinisches Formular ausfüllen.",
    form_btn: "Formular ausfüllen",
    support_btn: "Patientensupport verständigen",
    faq_prompt: "Du bist **Savie**, ein freundlicher Begleiter bei Saventic Care.  \n\
Nutze **nur** die folgenden Auszüge aus unseren Service-Dokumenten (FAQ).  \n\
Wenn keine Antwort gefunden wird, antworte: „Dazu habe ich leider keine Informationen.“  \n\
\n\
**Dokumente:**  \n\
{context}\n\
\n\
**Frage:**  \n\
{question}\n\
\n\
**Antwort (in Du-Form):**",
    faq_category_label: "Kategorie",
    faq_language_label: "Sprache",
    faq_all_categories: "alle",
    no_info_response: "Dazu habe ich leider keine Informationen.",
    no_info_disease: "Keine Informationen zur angefragten Erkrankung gefunden.",
    service_unavailable: "Der Service ist derzeit nicht verfügbar. Bitte versuche es später erneut.",
    no_subtypes_found: "Für diesen Code wurden keine Subtypen gefunden.",
    select_subtype_prompt: "Bitte wähle einen Subtyp aus:",
    select_mode_prompt: "Wähle bitte zuerst einen Modus aus.",
    service_button: "Frage zum Service",
    rare_button: "Frage zu seltener Erkrankung",
    freq_very_frequent: "Sehr häufig",
    freq_frequent: "Häufig",
    freq_occasional: "Gelegentlich",
    summary_symptoms: "Zu dieser Erkrankung sind {vf} sehr häufige, {f} häufige und {o} gelegentliche Symptome beschrieben.",
};

static EN: Texts = Texts {
    welcome_title: "Hi, I’m Savie",
    med_response: "I’m sorry, but I can’t provide medical advice. You can fill out our medical information form.",
    form_btn: "Fill out form",
    support_btn: "Contact patient support",
    faq_prompt: "You are **Savie**, your friendly companion at Saventic Care.  \n\
Use **only** the following excerpts from our service FAQ documents.  \n\
If you find no answer, reply: “I’m sorry, I have no information on that.”  \n\
\n\
**Documents:**  \n\
{context}\n\
\n\
**Question:**  \n\
{question}\n\
\n\
**Answer (in friendly tone):**",
    faq_category_label: "category",
    faq_language_label: "language",
    faq_all_categories: "all",
    no_info_response: "I’m sorry, I have no information on that.",
    no_info_disease: "No information found for that disease.",
    service_unavailable: "The service is currently unavailable. Please try again later.",
    no_subtypes_found: "No subtypes were found for this code.",
    select_subtype_prompt: "Please select a subtype:",
    select_mode_prompt: "Please select a mode first.",
    service_button: "Service question",
    rare_button: "Rare disease question",
    freq_very_frequent: "Very frequent",
    freq_frequent: "Frequent",
    freq_occasional: "Occasional",
    summary_symptoms: "For this disease, there are {vf} very frequent, {f} frequent, and {o} occasional symptoms described.",
};

static PL: Texts = Texts {
    welcome_title: "Cześć, jestem Savie",
    med_response: "Przepraszam, ale nie udzielam porad medycznych. Możesz wypełnić nasz formularz medyczny.",
    form_btn: "Wypełnij formularz",
    support_btn: "Skontaktuj się z pomocą pacjenta",
    faq_prompt: "Jesteś **Savie**, przyjaznym przewodnikiem Saventic Care.  \n\
Użyj **wyłącznie** poniższych fragmentów naszych dokumentów FAQ.  \n\
Jeśli nie znajdziesz odpowiedzi, odpowiedz: „Niestety nie mam na ten temat informacji.”  \n\
\n\
**Dokumenty:**  \n\
{context}\n\
\n\
**Pytanie:**  \n\
{question}\n\
\n\
**Odpowiedź (w formie nieformalnej):**",
    faq_category_label: "kategoria",
    faq_language_label: "język",
    faq_all_categories: "wszystkie",
    no_info_response: "Niestety nie mam na ten temat informacji.",
    no_info_disease: "Brak informacji o tej chorobie.",
    service_unavailable: "Serwis jest obecnie niedostępny. Spróbuj ponownie później.",
    no_subtypes_found: "Nie znaleziono podtypów dla tego kodu.",
    select_subtype_prompt: "Wybierz podtyp:",
    select_mode_prompt: "Wybierz najpierw tryb.",
    service_button: "Pytanie o serwis",
    rare_button: "Pytanie o rzadką chorobę",
    freq_very_frequent: "Bardzo częste",
    freq_frequent: "Częste",
    freq_occasional: "Okazjonalne",
    summary_symptoms: "Dla tej choroby opisano {vf} bardzo częstych, {f} częstych i {o} okazjonalnych objawów.",
};

static ES: Texts = Texts {
    welcome_title: "Hola, soy Savie",
    med_response: "Lo siento, pero no puedo dar consejos médicos. Puedes llenar nuestro formulario médico.",
    form_btn: "Rellenar formulario",
    support_btn: "Contactar soporte al paciente",
    faq_prompt: "Eres **Savie**, tu compañero amigable en Saventic Care.  \n\
Usa **solo** los siguientes extractos de nuestros documentos de FAQ.  \n\
Si no encuentras respuesta, responde: “Lo siento, no tengo información al respecto.”  \n\
\n\
**Documentos:**  \n\
{context}\n\
\n\
**Pregunta:**  \n\
{question}\n\
\n\
**Respuesta (tono amigable):**",
    faq_category_label: "categoría",
    faq_language_label: "idioma",
    faq_all_categories: "todas",
    no_info_response: "Lo siento, no tengo información al respecto.",
    no_info_disease: "No se encontró información sobre esa enfermedad.",
    service_unavailable: "El servicio no está disponible actualmente. Inténtalo de nuevo más tarde.",
    no_subtypes_found: "No se encontraron subtipos para este código.",
    select_subtype_prompt: "Selecciona un subtipo:",
    select_mode_prompt: "Por favor, selecciona primero un modo.",
    service_button: "Pregunta sobre el servicio",
    rare_button: "Pregunta sobre enfermedad rara",
    freq_very_frequent: "Muy frecuentes",
    freq_frequent: "Frecuentes",
    freq_occasional: "Ocasionales",
    summary_symptoms: "Para esta enfermedad se describen {vf} síntomas muy frecuentes, {f} frecuentes y {o} ocasionales.",
};

static PT: Texts = Texts {
    welcome_title: "Oi, eu sou a Savie",
    med_response: "Desculpe, mas não forneço conselhos médicos. Você pode preencher nosso formulário médico.",
    form_btn: "Preencher formulário",
    support_btn: "Contatar suporte ao paciente",
    faq_prompt: "Você é **Savie**, seu guia amigável na Saventic Care.  \n\
Use **apenas** os seguintes trechos de nossos documentos de FAQ.  \n\
Se não encontrar resposta, responda: “Desculpe, não tenho informações sobre isso.”  \n\
\n\
**Documentos:**  \n\
{context}\n\
\n\
**Pergunta:**  \n\
{question}\n\
\n\
**Resposta (tom amigável):**",
    faq_category_label: "categoria",
    faq_language_label: "idioma",
    faq_all_categories: "todas",
    no_info_response: "Desculpe, não tenho informações sobre isso.",
    no_info_disease: "Nenhuma informação encontrada para essa doença.",
    service_unavailable: "O serviço está indisponível no momento. Tente novamente mais tarde.",
    no_subtypes_found: "Nenhum subtipo foi encontrado para este código.",
    select_subtype_prompt: "Selecione um subtipo:",
    select_mode_prompt: "Por favor, selecione primeiro um modo.",
    service_button: "Pergunta sobre o serviço",
    rare_button: "Pergunta sobre doença rara",
    freq_very_frequent: "Muito frequentes",
    freq_frequent: "Frequentes",
    freq_occasional: "Ocasionalmente",
    summary_symptoms: "Para esta doença, são descritos {vf} sintomas muito frequentes, {f} frequentes e {o} ocasionais.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for lang in ALL_LANGS {
            assert_eq!(Lang::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        assert_eq!(Lang::from_code("fr"), None);
        assert_eq!(Lang::from_code_lossy("fr"), Lang::En);
        assert_eq!(Lang::from_code_lossy(""), Lang::En);
    }

    #[test]
    fn upper_code_matches_lower() {
        for lang in ALL_LANGS {
            assert_eq!(lang.code_upper(), lang.code().to_uppercase());
        }
    }

    #[test]
    fn faq_prompts_carry_placeholders() {
        for lang in ALL_LANGS {
            let t = texts(lang);
            assert!(t.faq_prompt.contains("{context}"), "{lang}");
            assert!(t.faq_prompt.contains("{question}"), "{lang}");
        }
    }

    #[test]
    fn summary_templates_carry_all_three_counts() {
        for lang in ALL_LANGS {
            let t = texts(lang);
            assert!(t.summary_symptoms.contains("{vf}"), "{lang}");
            assert!(t.summary_symptoms.contains("{f}"), "{lang}");
            assert!(t.summary_symptoms.contains("{o}"), "{lang}");
        }
    }
}
