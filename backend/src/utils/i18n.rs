//! Internationalization utilities for the backend
//!
//! This module normalizes locale strings coming from HTTP requests
//! (`Accept-Language`, the `language` body field) into one of the
//! locales the message catalogues under `locales/` provide.

/// Supported locales, one catalogue file each
pub const SUPPORTED_LOCALES: &[&str] = &["fr", "en", "es", "ar", "pt", "de", "it", "zh", "ru", "ja"];
pub const DEFAULT_LOCALE: &str = "fr";

/// Normalize locale string to supported format
/// Accepts: "fr", "fr-FR", "fr_CA", "en-US,en;q=0.9", etc.
pub fn normalize_locale(locale: &str) -> &'static str {
    let locale = locale.trim().to_lowercase();

    // Extract primary language tag
    let primary = locale.split(['-', '_', ',', ';']).next().unwrap_or(DEFAULT_LOCALE);

    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| *supported == primary)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Whether the primary tag of `locale` is one of the supported locales
pub fn is_supported(locale: &str) -> bool {
    let locale = locale.trim().to_lowercase();
    let primary = locale.split(['-', '_']).next().unwrap_or_default();
    SUPPORTED_LOCALES.contains(&primary)
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> &'static str {
    match header_value {
        Some(value) => normalize_locale(value),
        None => DEFAULT_LOCALE,
    }
}
