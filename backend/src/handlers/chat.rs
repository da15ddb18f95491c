use axum::{Extension, Json, extract::State};
use chrono::Utc;
use std::sync::Arc;

use super::LenientJson;
use crate::AppState;
use crate::config::ChatProfileConfig;
use crate::middleware::RequestLocale;
use crate::models::{ChatRequest, ChatResponse, HistoryResponse};
use crate::utils::{ApiError, ApiResult};

// Ask a question from the web form
#[utoipa::path(
    post,
    path = "/ask",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer from the assistant", body = ChatResponse),
        (status = 400, description = "Missing question", body = crate::utils::ApiErrorResponse),
        (status = 429, description = "Provider rate limit exceeded", body = crate::utils::ApiErrorResponse),
        (status = 500, description = "Provider or server failure", body = crate::utils::ApiErrorResponse),
    ),
    tag = "Chat"
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Extension(locale): Extension<RequestLocale>,
    LenientJson(req): LenientJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    answer_question(&state, req, locale, &state.config.chat.web).await
}

// Ask a question from the mobile application
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer from the assistant", body = ChatResponse),
        (status = 400, description = "Missing or too long question", body = crate::utils::ApiErrorResponse),
        (status = 429, description = "Provider rate limit exceeded", body = crate::utils::ApiErrorResponse),
        (status = 500, description = "Provider or server failure", body = crate::utils::ApiErrorResponse),
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(locale): Extension<RequestLocale>,
    LenientJson(req): LenientJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    answer_question(&state, req, locale, &state.config.chat.mobile).await
}

#[utoipa::path(
    get,
    path = "/api/chat/history",
    responses(
        (status = 200, description = "Conversation history, always empty", body = HistoryResponse)
    ),
    tag = "Chat"
)]
pub async fn history(Extension(locale): Extension<RequestLocale>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: Vec::new(),
        message: rust_i18n::t!("history.unavailable", locale = locale.as_str()).to_string(),
    })
}

async fn answer_question(
    state: &AppState,
    req: ChatRequest,
    locale: RequestLocale,
    profile: &ChatProfileConfig,
) -> ApiResult<Json<ChatResponse>> {
    let rejection_locale = req.rejection_locale(locale.as_str());
    let question = req
        .into_question(profile.max_question_chars)
        .map_err(|e| e.in_locale(rejection_locale))?;

    let language = question.language.resolve(&question.text);
    tracing::info!(
        "Chat request from user {}, session {}",
        question.user_id,
        question.session_id
    );
    tracing::debug!("Answering in {} with max_tokens={}", language, profile.max_tokens);

    let answer = state
        .chat_service
        .ask(&question, language, profile)
        .await
        .map_err(|e| ApiError::from(e).in_locale(language.as_str()))?;

    Ok(Json(ChatResponse {
        answer,
        detected_language: language,
        timestamp: Utc::now().to_rfc3339(),
        session_id: question.session_id,
        user_id: question.user_id,
        model_used: state.chat_service.model().to_string(),
    }))
}
