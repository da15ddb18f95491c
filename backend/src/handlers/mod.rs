pub mod chat;
pub mod extract;
pub mod feedback;
pub mod pages;
pub mod system;

pub use extract::LenientJson;

use axum::Extension;

use crate::middleware::RequestLocale;
use crate::utils::{ApiError, LocalizedApiError};

/// Fallback for unknown routes
pub async fn not_found(Extension(locale): Extension<RequestLocale>) -> LocalizedApiError {
    ApiError::NotFound.in_locale(locale.as_str())
}
