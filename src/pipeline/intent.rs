//! Regex-based intent detection, per language.
//!
//! Two independent pattern families:
//! - personal-medical-disclosure: first-person symptom statements that must
//!   short-circuit to the fixed disclaimer plus the two action affordances;
//! - form-completion-exception: "I have filled out the form" phrasings that
//!   route to the FAQ path regardless of mode. Only defined for German and
//!   English; for the other languages the absence of a rule is a first-class
//!   "never matches" value, not an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::i18n::Lang;

static PERSONAL_DE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:ich habe|habe ich)\b(?: (?:husten|fieber|kopfschmerzen?|bauchschmerzen?|rückenschmerzen?|schwindlig|übel|erkrankung|krankheit|schmerzen|symptom|symptome)\b(?: .*)?)|bin ich krank\b(?: .*)?|mir ist\b(?: .*)?|mir tut der? (?:kopf|bauch|rücken|brust) weh\b(?: .*)?|ich fühle mich\b(?: .*)?|brauche (?:medikament|tablette)\b(?: .*)?|was soll ich tun (?:wenn|bei)\b(?: .*)?)\b",
    )
    .unwrap()
});

static PERSONAL_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:i have|have i)\b(?: (?:cough|fever|headache|stomach ache|back pain|nausea|dizzy|illness|disease|symptom|symptoms)\b(?: .*)?)|am i sick\b(?: .*)?|i feel\b(?: .*)?|my (?:head|stomach|back|chest) hurts\b(?: .*)?|do i need medicine\b(?: .*)?|which medicine should i take\b(?: .*)?|what should i do if (?:i have|i feel)\b(?: .*)?)\b",
    )
    .unwrap()
});

static PERSONAL_PL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:mam|czy mam)\b(?: (?:kaszel|gor[ąa]czka|b[óo]l głowy|b[óo]le brzucha|b[óo]l plec[óo]w|zawroty głowy|nudno[śs]ci|choroba|objaw|objawy)\b(?: .*)?)|boli mnie\b(?: .*)?|co mam zrobić jeśli\b(?: .*)?)\b",
    )
    .unwrap()
});

static PERSONAL_ES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:tengo|¿tengo)\b(?: (?:tos|fiebre|dolor de cabeza|dolor de estómago|dolor de espalda|náuseas|mareado|enfermedad|síntoma|síntomas)\b(?: .*)?)|me duele\b(?: .*)?|¿qué debo hacer si\b(?: .*)?)\b",
    )
    .unwrap()
});

static PERSONAL_PT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:tenho)\b(?: (?:tosse|febre|dor de cabeça|dor de estômago|dor nas costas|náusea|tontura|doença|sintoma|sintomas)\b(?: .*)?)|me dói\b(?: .*)?|o que devo fazer se\b(?: .*)?)\b",
    )
    .unwrap()
});

static EXCEPTION_DE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bich habe\b.*\b ausgefüllt\b").unwrap());

static EXCEPTION_EN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bi have\b.*\b(filled out|completed)\b").unwrap());

/// The personal-disclosure pattern for a language. Defined for all five.
pub fn personal_disclosure_pattern(lang: Lang) -> Option<&'static Regex> {
    match lang {
        Lang::De => Some(&PERSONAL_DE),
        Lang::En => Some(&PERSONAL_EN),
        Lang::Pl => Some(&PERSONAL_PL),
        Lang::Es => Some(&PERSONAL_ES),
        Lang::Pt => Some(&PERSONAL_PT),
    }
}

/// The form-completion-exception pattern for a language, if one exists.
pub fn form_exception_pattern(lang: Lang) -> Option<&'static Regex> {
    match lang {
        Lang::De => Some(&EXCEPTION_DE),
        Lang::En => Some(&EXCEPTION_EN),
        Lang::Pl | Lang::Es | Lang::Pt => None,
    }
}

pub fn is_personal_disclosure(lang: Lang, text: &str) -> bool {
    personal_disclosure_pattern(lang)
        .map(|p| p.is_match(text))
        .unwrap_or(false)
}

pub fn is_form_exception(lang: Lang, text: &str) -> bool {
    form_exception_pattern(lang)
        .map(|p| p.is_match(text))
        .unwrap_or(false)
}
