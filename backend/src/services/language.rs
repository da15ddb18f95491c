//! Language selection for incoming questions
//!
//! Best-effort heuristic: Unicode block checks first, then substring
//! matching against small keyword lists in a fixed priority order.
//! Overlapping keywords (`que` is both French and Portuguese) resolve
//! to whichever list is checked first.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::i18n;

/// Languages with a system prompt and a message catalogue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Es,
    Ar,
    Pt,
    De,
    It,
    Zh,
    Ru,
    Ja,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Self::Fr,
        Self::En,
        Self::Es,
        Self::Ar,
        Self::Pt,
        Self::De,
        Self::It,
        Self::Zh,
        Self::Ru,
        Self::Ja,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Es => "es",
            Self::Ar => "ar",
            Self::Pt => "pt",
            Self::De => "de",
            Self::It => "it",
            Self::Zh => "zh",
            Self::Ru => "ru",
            Self::Ja => "ja",
        }
    }

    /// Parse a language code, tolerating region suffixes (`pt-BR`)
    pub fn from_code(code: &str) -> Option<Self> {
        if !i18n::is_supported(code) {
            return None;
        }
        let normalized = i18n::normalize_locale(code);
        Self::ALL.into_iter().find(|lang| lang.as_str() == normalized)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language requested by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageChoice {
    Auto,
    Explicit(String),
}

impl LanguageChoice {
    pub const AUTO: &'static str = "auto";

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Auto,
            Some(v) if v.eq_ignore_ascii_case(Self::AUTO) => Self::Auto,
            Some(v) => Self::Explicit(v.to_string()),
        }
    }

    /// Resolve to a concrete language, detecting from `text` when automatic.
    /// Unsupported explicit codes resolve to the default language.
    pub fn resolve(&self, text: &str) -> Language {
        match self {
            Self::Auto => detect_language(text),
            Self::Explicit(code) => Language::from_code(code).unwrap_or_default(),
        }
    }
}

const ARABIC: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';
const CJK_UNIFIED: std::ops::RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';
const HIRAGANA: std::ops::RangeInclusive<char> = '\u{3040}'..='\u{309F}';
const KATAKANA: std::ops::RangeInclusive<char> = '\u{30A0}'..='\u{30FF}';

/// Keyword lists in priority order
const KEYWORDS: &[(Language, &[&str])] = &[
    (
        Language::Es,
        &[
            "qué", "cómo", "cuál", "cuándo", "dónde", "por qué", "puedo", "tengo", "necesito",
            "abogado", "derecho", "usted", "hola", "gracias",
        ],
    ),
    (
        Language::En,
        &[
            "what", "how ", "when", "where", "which", "why", "can i", "should", "would", "could",
            "lawyer", "contract", "please", "hello", "rights", "the ",
        ],
    ),
    (
        Language::Fr,
        &[
            "que", "quoi", "comment", "pourquoi", "est-ce", "puis-je", "avocat", "droit",
            "contrat", "bonjour", "merci", "je ", "mon ", "les ", "une ",
        ],
    ),
    (
        Language::De,
        &[
            "was ", "wie", "warum", "ich", "nicht", "und", "der ", "die ", "das ", "recht",
            "anwalt", "vertrag", "kann", "bitte",
        ],
    ),
    (
        Language::It,
        &[
            "cosa", "come", "perché", "posso", "avvocato", "diritto", "contratto", "ciao",
            "della", "sono", "grazie",
        ],
    ),
    (
        Language::Pt,
        &[
            "que", "você", "como", "posso", "advogado", "direito", "contrato", "olá",
            "obrigado", "não",
        ],
    ),
    (
        Language::Ru,
        &[
            "что", "как", "почему", "закон", "право", "договор", "юрист", "адвокат", "можно",
            "здравствуйте", "спасибо",
        ],
    ),
];

/// Guess the language of `text`; never fails, defaults to French
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(|c| ARABIC.contains(&c)) {
        return Language::Ar;
    }
    if text.chars().any(|c| CJK_UNIFIED.contains(&c)) {
        return Language::Zh;
    }
    if text.chars().any(|c| HIRAGANA.contains(&c) || KATAKANA.contains(&c)) {
        return Language::Ja;
    }

    let lowered = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(lang, _)| *lang)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_ranges() {
        assert_eq!(detect_language("ما هو العقد؟"), Language::Ar);
        assert_eq!(detect_language("什么是合同？"), Language::Zh);
        assert_eq!(detect_language("けいやくとは"), Language::Ja);
        assert_eq!(detect_language("カタカナ"), Language::Ja);
    }

    #[test]
    fn test_arabic_wins_over_everything() {
        assert_eq!(detect_language("What is 合同 and عقد?"), Language::Ar);
    }

    #[test]
    fn test_cjk_wins_over_kana() {
        // Kanji are CJK ideographs, checked before kana
        assert_eq!(detect_language("契約とは何ですか"), Language::Zh);
    }

    #[test]
    fn test_keyword_languages() {
        assert_eq!(detect_language("What is a contract?"), Language::En);
        assert_eq!(detect_language("¿Cómo puedo demandar?"), Language::Es);
        assert_eq!(detect_language("Comment rompre un bail ?"), Language::Fr);
        assert_eq!(detect_language("Wie kündige ich meinen Mietvertrag?"), Language::De);
        assert_eq!(detect_language("Cosa dice il diritto del lavoro?"), Language::It);
        assert_eq!(detect_language("Você pode me ajudar?"), Language::Pt);
        assert_eq!(detect_language("Что такое договор?"), Language::Ru);
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(detect_language("WHAT HAPPENS NOW"), Language::En);
        assert_eq!(detect_language("ЧТО ДЕЛАТЬ"), Language::Ru);
    }

    #[test]
    fn test_overlap_resolved_by_order() {
        // "que" is in both the French and Portuguese lists; French is checked first
        assert_eq!(detect_language("Eu acho que sim"), Language::Fr);
    }

    #[test]
    fn test_default_is_french() {
        assert_eq!(detect_language("12345"), Language::Fr);
        assert_eq!(detect_language("xyz"), Language::Fr);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let text = "Puis-je résilier mon contrat ?";
        let first = detect_language(text);
        for _ in 0..10 {
            assert_eq!(detect_language(text), first);
        }
    }

    #[test]
    fn test_language_choice() {
        assert_eq!(LanguageChoice::parse(None), LanguageChoice::Auto);
        assert_eq!(LanguageChoice::parse(Some("AUTO")), LanguageChoice::Auto);
        assert_eq!(LanguageChoice::parse(Some("  ")), LanguageChoice::Auto);
        assert_eq!(LanguageChoice::parse(Some("en")).resolve("Bonjour"), Language::En);
        assert_eq!(LanguageChoice::parse(Some("pt-BR")).resolve("hello"), Language::Pt);
        assert_eq!(LanguageChoice::parse(Some("nl")).resolve("hello"), Language::Fr);
        assert_eq!(LanguageChoice::Auto.resolve("hello"), Language::En);
    }

    #[test]
    fn test_from_code() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.as_str()), Some(lang));
        }
        assert_eq!(Language::from_code("auto"), None);
    }
}
