//! System prompts per language
//!
//! Each prompt constrains tone and requires the legal disclaimer.
//! The table is built once and never mutated.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::models::ChatMessage;
use crate::services::language::Language;

const FALLBACK_PROMPT: &str = include_str!("prompts/fr.md");

static PROMPTS: Lazy<HashMap<Language, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (Language::Fr, FALLBACK_PROMPT),
        (Language::En, include_str!("prompts/en.md")),
        (Language::Es, include_str!("prompts/es.md")),
        (Language::Ar, include_str!("prompts/ar.md")),
        (Language::Pt, include_str!("prompts/pt.md")),
        (Language::De, include_str!("prompts/de.md")),
        (Language::It, include_str!("prompts/it.md")),
        (Language::Zh, include_str!("prompts/zh.md")),
        (Language::Ru, include_str!("prompts/ru.md")),
        (Language::Ja, include_str!("prompts/ja.md")),
    ])
});

/// System instruction for `language`, French when the table has no entry
pub fn system_prompt(language: Language) -> &'static str {
    PROMPTS.get(&language).copied().unwrap_or(FALLBACK_PROMPT).trim()
}

/// System instruction followed by the question as the only user turn
pub fn build_messages(question: &str, language: Language) -> Vec<ChatMessage> {
    vec![ChatMessage::system(system_prompt(language)), ChatMessage::user(question)]
}
