use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::lenient_string;
use crate::services::language::{Language, LanguageChoice};
use crate::utils::ApiError;

pub const ANONYMOUS_USER: &str = "anonymous";
pub const DEFAULT_SESSION: &str = "default";

/// Raw chat body. Every field is optional; validation happens in
/// [`ChatRequest::into_question`].
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Qu'est-ce qu'un contrat ?")]
    pub question: Option<String>,
    /// Language code, or "auto" (default) to detect it from the question
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "auto")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
}

/// A validated question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub language: LanguageChoice,
    pub user_id: String,
    pub session_id: String,
}

impl ChatRequest {
    fn trimmed_question(&self) -> &str {
        self.question.as_deref().map(str::trim).unwrap_or_default()
    }

    fn language_choice(&self) -> LanguageChoice {
        LanguageChoice::parse(self.language.as_deref())
    }

    /// Locale a rejection of this request is reported in.
    /// Without text to detect from, an automatic choice uses `fallback`.
    pub fn rejection_locale(&self, fallback: &'static str) -> &'static str {
        let text = self.trimmed_question();
        match self.language_choice() {
            LanguageChoice::Auto if text.is_empty() => fallback,
            choice => choice.resolve(text).as_str(),
        }
    }

    /// Validate and apply defaults. `max_chars` counts Unicode scalar values.
    pub fn into_question(self, max_chars: Option<usize>) -> Result<Question, ApiError> {
        let text = self.trimmed_question().to_string();
        if text.is_empty() {
            return Err(ApiError::MissingQuestion);
        }

        if let Some(max) = max_chars
            && text.chars().count() > max
        {
            return Err(ApiError::QuestionTooLong { max });
        }

        let language = self.language_choice();
        Ok(Question {
            text,
            language,
            user_id: self.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string()),
            session_id: self.session_id.unwrap_or_else(|| DEFAULT_SESSION.to_string()),
        })
    }
}

/// Successful answer
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub answer: String,
    pub detected_language: Language,
    pub timestamp: String,
    pub session_id: String,
    pub user_id: String,
    pub model_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ChatRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let question = parse(r#"{"question": "  Qu'est-ce qu'un bail ?  "}"#)
            .into_question(None)
            .unwrap();
        assert_eq!(question.text, "Qu'est-ce qu'un bail ?");
        assert_eq!(question.language, LanguageChoice::Auto);
        assert_eq!(question.user_id, "anonymous");
        assert_eq!(question.session_id, "default");
    }

    #[test]
    fn test_missing_or_blank_question() {
        for body in [r#"{}"#, r#"{"question": ""}"#, r#"{"question": "   \n\t"}"#, r#"{"question": null}"#] {
            assert!(matches!(parse(body).into_question(None), Err(ApiError::MissingQuestion)));
        }
    }

    #[test]
    fn test_non_string_fields_are_coerced() {
        let question = parse(r#"{"question": 42, "user_id": 7, "session_id": true}"#)
            .into_question(None)
            .unwrap();
        assert_eq!(question.text, "42");
        assert_eq!(question.user_id, "7");
        assert_eq!(question.session_id, "true");
    }

    #[test]
    fn test_length_cap_counts_characters() {
        // 1000 two-byte characters fit, 1001 do not
        let at_cap = format!(r#"{{"question": "{}"}}"#, "é".repeat(1000));
        assert!(parse(&at_cap).into_question(Some(1000)).is_ok());

        let over_cap = format!(r#"{{"question": "{}"}}"#, "é".repeat(1001));
        assert!(matches!(
            parse(&over_cap).into_question(Some(1000)),
            Err(ApiError::QuestionTooLong { max: 1000 })
        ));

        // No cap configured
        assert!(parse(&over_cap).into_question(None).is_ok());
    }

    #[test]
    fn test_length_measured_after_trim() {
        let padded = format!(r#"{{"question": "  {}  "}}"#, "a".repeat(10));
        assert!(parse(&padded).into_question(Some(10)).is_ok());
    }

    #[test]
    fn test_rejection_locale() {
        assert_eq!(parse(r#"{"question": ""}"#).rejection_locale("fr"), "fr");
        assert_eq!(parse(r#"{"question": ""}"#).rejection_locale("de"), "de");
        assert_eq!(parse(r#"{"question": "", "language": "es"}"#).rejection_locale("fr"), "es");
        assert_eq!(parse(r#"{"question": "What now?"}"#).rejection_locale("fr"), "en");
    }
}
