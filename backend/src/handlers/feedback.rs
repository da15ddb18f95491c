use axum::{Extension, Json};
use chrono::Utc;

use super::LenientJson;
use crate::middleware::RequestLocale;
use crate::models::{Feedback, FeedbackRequest, FeedbackResponse};
use crate::utils::ApiResult;

#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback acknowledged", body = FeedbackResponse),
        (status = 400, description = "Rating is not an integer from 1 to 5", body = crate::utils::ApiErrorResponse),
    ),
    tag = "Feedback"
)]
pub async fn submit_feedback(
    Extension(locale): Extension<RequestLocale>,
    LenientJson(req): LenientJson<FeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    let feedback = Feedback::try_from(req).map_err(|e| e.in_locale(locale.as_str()))?;

    tracing::info!("Feedback received: {}/5 from user {}", feedback.rating, feedback.user_id);
    if !feedback.comment.is_empty() {
        tracing::debug!("Feedback comment: {}", feedback.comment);
    }

    Ok(Json(FeedbackResponse {
        message: rust_i18n::t!("feedback.thanks", locale = locale.as_str()).to_string(),
        rating: feedback.rating,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
