pub mod chat;
pub mod feedback;
pub mod system;

pub use chat::*;
pub use feedback::*;
pub use system::*;

use serde::Deserialize;

/// Accept any JSON scalar where a string is expected.
/// Numbers and booleans are stringified, `null` reads as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
