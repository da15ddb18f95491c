pub mod error;
pub mod i18n;

pub use error::{ApiError, ApiErrorResponse, ApiResult, LocalizedApiError};
pub use i18n::{DEFAULT_LOCALE, extract_locale_from_header, normalize_locale};
