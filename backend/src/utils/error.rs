use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::i18n::{DEFAULT_LOCALE, normalize_locale};
use crate::services::llm::LLMError;

/// API Error surfaced to clients as `{error, code}`
///
/// The `Display` text is for logs only. Clients always receive the
/// catalogue message for the variant, never the inner detail.
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors
    #[error("Missing question")]
    MissingQuestion,

    #[error("Question exceeds {max} characters")]
    QuestionTooLong { max: usize },

    #[error("Invalid rating")]
    InvalidRating,

    // Provider errors
    #[error("Provider authentication failed")]
    ProviderAuth,

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider API error: {0}")]
    ProviderApi(String),

    // Routing
    #[error("Endpoint not found")]
    NotFound,

    // System errors
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Machine-readable error tag
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingQuestion => "MISSING_QUESTION",
            Self::QuestionTooLong { .. } => "QUESTION_TOO_LONG",
            Self::InvalidRating => "INVALID_RATING",
            Self::ProviderAuth => "OPENAI_AUTH_ERROR",
            Self::RateLimited => "RATE_LIMIT_EXCEEDED",
            Self::ProviderApi(_) => "OPENAI_API_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Unexpected(_) | Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingQuestion | Self::QuestionTooLong { .. } | Self::InvalidRating => {
                StatusCode::BAD_REQUEST
            },
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ProviderAuth
            | Self::ProviderApi(_)
            | Self::Unexpected(_)
            | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get localized error message for the given locale
    pub fn localized_message(&self, locale: &str) -> String {
        let locale = normalize_locale(locale);
        match self {
            Self::MissingQuestion => t!("error.missing_question", locale = locale).to_string(),
            Self::QuestionTooLong { max } => {
                t!("error.question_too_long", locale = locale, max = max).to_string()
            },
            Self::InvalidRating => t!("error.invalid_rating", locale = locale).to_string(),
            Self::ProviderAuth => t!("error.provider_auth", locale = locale).to_string(),
            Self::RateLimited => t!("error.rate_limited", locale = locale).to_string(),
            Self::ProviderApi(_) => t!("error.provider_api", locale = locale).to_string(),
            Self::NotFound => t!("error.not_found", locale = locale).to_string(),
            Self::Unexpected(_) => t!("error.unexpected", locale = locale).to_string(),
            Self::InternalError(_) => t!("error.internal", locale = locale).to_string(),
        }
    }

    /// Attach the locale the client should read the message in
    pub fn in_locale(self, locale: &str) -> LocalizedApiError {
        LocalizedApiError { error: self, locale: normalize_locale(locale) }
    }
}

impl From<LLMError> for ApiError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::Authentication => Self::ProviderAuth,
            LLMError::RateLimited => Self::RateLimited,
            LLMError::Api(detail) => Self::ProviderApi(detail),
            LLMError::Unknown(detail) => Self::Unexpected(detail),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    pub code: String,
}

/// An [`ApiError`] bound to the locale its message is rendered in
#[derive(Debug)]
pub struct LocalizedApiError {
    pub error: ApiError,
    pub locale: &'static str,
}

impl From<ApiError> for LocalizedApiError {
    fn from(error: ApiError) -> Self {
        Self { error, locale: DEFAULT_LOCALE }
    }
}

impl IntoResponse for LocalizedApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", self.error.code(), self.error);
        } else {
            tracing::debug!("Request rejected ({}): {}", self.error.code(), self.error);
        }

        let response = ApiErrorResponse {
            error: self.error.localized_message(self.locale),
            code: self.error.code().to_string(),
        };

        (status, Json(response)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        LocalizedApiError::from(self).into_response()
    }
}

pub type ApiResult<T> = Result<T, LocalizedApiError>;
