pub mod chat_service;
pub mod content_service;
pub mod language;
pub mod llm;

pub use chat_service::ChatService;
pub use content_service::{ContentService, LegalPage};
pub use language::{Language, LanguageChoice, detect_language};
