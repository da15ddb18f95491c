pub mod locale;

pub use locale::{RequestLocale, locale_middleware};
