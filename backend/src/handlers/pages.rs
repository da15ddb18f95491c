use axum::{Extension, extract::State, response::Html};
use std::sync::Arc;

use crate::AppState;
use crate::middleware::RequestLocale;
use crate::services::LegalPage;
use crate::utils::ApiResult;
use rust_i18n::t;

#[utoipa::path(get, path = "/privacy_policy", responses((status = 200, description = "Privacy policy")), tag = "Pages")]
pub async fn privacy_policy(
    State(state): State<Arc<AppState>>,
    Extension(locale): Extension<RequestLocale>,
) -> ApiResult<Html<String>> {
    render(&state, LegalPage::PrivacyPolicy, locale).await
}

#[utoipa::path(get, path = "/legal_notice", responses((status = 200, description = "Legal notice")), tag = "Pages")]
pub async fn legal_notice(
    State(state): State<Arc<AppState>>,
    Extension(locale): Extension<RequestLocale>,
) -> ApiResult<Html<String>> {
    render(&state, LegalPage::LegalNotice, locale).await
}

#[utoipa::path(get, path = "/terms", responses((status = 200, description = "Terms and conditions")), tag = "Pages")]
pub async fn terms(
    State(state): State<Arc<AppState>>,
    Extension(locale): Extension<RequestLocale>,
) -> ApiResult<Html<String>> {
    render(&state, LegalPage::Terms, locale).await
}

async fn render(state: &AppState, page: LegalPage, locale: RequestLocale) -> ApiResult<Html<String>> {
    let locale = locale.as_str();
    let content = match state.content_service.render_markdown(page).await {
        Some(html) => html,
        None => format!("<p>{}</p>", t!("pages.content_unavailable", locale = locale)),
    };
    let title = page_title(page, locale);

    let html = state
        .content_service
        .legal_page_html(&title, &content)
        .map_err(|e| e.error.in_locale(locale))?;
    Ok(Html(html))
}

fn page_title(page: LegalPage, locale: &str) -> String {
    match page {
        LegalPage::PrivacyPolicy => t!("pages.privacy_policy", locale = locale),
        LegalPage::LegalNotice => t!("pages.legal_notice", locale = locale),
        LegalPage::Terms => t!("pages.terms", locale = locale),
    }
    .to_string()
}
