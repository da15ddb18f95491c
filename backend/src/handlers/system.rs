use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::AppState;
use crate::models::{HealthResponse, InfoResponse, ServiceDescriptor};
use crate::utils::ApiResult;

/// Home page for browsers, service descriptor for API clients
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "HTML home page when the client accepts text/html", body = ServiceDescriptor)
    ),
    tag = "System"
)]
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Response> {
    if accepts_html(&headers) {
        let page = state.content_service.index_html()?;
        return Ok(Html(page).into_response());
    }
    Ok(Json(ServiceDescriptor::current()).into_response())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let configured = state.chat_service.is_configured();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        provider_configured: configured,
        openai_configured: configured,
    })
}

#[utoipa::path(
    get,
    path = "/api/info",
    responses(
        (status = 200, description = "Application description", body = InfoResponse)
    ),
    tag = "System"
)]
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse::current())
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
