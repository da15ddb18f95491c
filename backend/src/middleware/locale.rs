//! Locale extraction middleware
//!
//! Reads the Accept-Language header and stores the normalized locale in
//! the request extensions, where handlers pick it up as
//! `Extension<RequestLocale>`.

use axum::{extract::Request, http::header::ACCEPT_LANGUAGE, middleware::Next, response::Response};

use crate::utils::extract_locale_from_header;

/// Locale negotiated for the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub &'static str);

impl RequestLocale {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub async fn locale_middleware(mut req: Request, next: Next) -> Response {
    let header = req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
    let locale = RequestLocale(extract_locale_from_header(header));

    req.extensions_mut().insert(locale);
    next.run(req).await
}
