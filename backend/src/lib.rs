//! Juriste Virtuel backend
//!
//! Forwards legal questions to an OpenAI-compatible completion API under a
//! per-language system prompt and returns the answer as JSON.

rust_i18n::i18n!("locales", fallback = "fr");

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    http::{Method, header},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::llm::LLMClient;
use crate::services::{ChatService, ContentService};
use crate::utils::ApiError;

/// Shared, read-only application state
pub struct AppState {
    pub config: Config,
    pub chat_service: ChatService,
    pub content_service: ContentService,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn LLMClient>) -> Self {
        let chat_service = ChatService::new(client, &config.llm);
        let content_service = ContentService::new(&config.content.dir);
        Self { config, chat_service, content_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::system::index,
        handlers::system::health,
        handlers::system::info,
        handlers::chat::ask,
        handlers::chat::chat,
        handlers::chat::history,
        handlers::feedback::submit_feedback,
        handlers::pages::privacy_policy,
        handlers::pages::legal_notice,
        handlers::pages::terms,
    ),
    components(schemas(
        models::ChatRequest,
        models::ChatResponse,
        models::FeedbackRequest,
        models::FeedbackResponse,
        models::HealthResponse,
        models::InfoResponse,
        models::ServiceDescriptor,
        models::EndpointMap,
        models::HistoryResponse,
        services::Language,
        utils::ApiErrorResponse,
    )),
    tags(
        (name = "Chat", description = "Legal questions"),
        (name = "Feedback", description = "Answer ratings"),
        (name = "System", description = "Service status"),
        (name = "Pages", description = "Legal pages"),
    ),
    info(title = "Juriste Virtuel API", description = "Legal assistant backed by an LLM provider")
)]
pub struct ApiDoc;

/// Build the application router.
///
/// `/api/chat` answers its own preflight with `POST` as the only allowed
/// method; every other route allows `GET`, `POST` and `OPTIONS`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut site = Router::new()
        .route("/", get(handlers::system::index))
        .route("/ask", post(handlers::chat::ask))
        .route("/api/health", get(handlers::system::health))
        .route("/api/info", get(handlers::system::info))
        .route("/api/chat/history", get(handlers::chat::history))
        .route("/api/feedback", post(handlers::feedback::submit_feedback))
        .route("/privacy_policy", get(handlers::pages::privacy_policy))
        .route("/legal_notice", get(handlers::pages::legal_notice))
        .route("/terms", get(handlers::pages::terms))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found);

    let static_config = &state.config.static_config;
    if static_config.enabled {
        tracing::debug!("Serving static assets from {}", static_config.web_root);
        site = site.nest_service("/static", ServeDir::new(&static_config.web_root));
    }

    let mobile = Router::new().route("/api/chat", post(handlers::chat::chat));

    guarded(site, vec![Method::GET, Method::POST, Method::OPTIONS])
        .merge(guarded(mobile, vec![Method::POST]))
        .layer(axum_middleware::from_fn(middleware::locale_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Panic catching and CORS, inner to outer
fn guarded(router: Router<Arc<AppState>>, methods: Vec<Method>) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE]);

    router.layer(CatchPanicLayer::custom(handle_panic)).layer(cors)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::internal_error(format!("handler panicked: {}", detail)).into_response()
}
