use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// JSON body extractor that never rejects.
///
/// The body is parsed whatever the Content-Type. Anything that is not a
/// JSON object (empty body, malformed JSON, arrays, scalars) reads as
/// `T::default()`, leaving validation to the handler.
#[derive(Debug, Default)]
pub struct LenientJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Bytes::from_request(req, state).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Unreadable request body: {}", e);
                return Ok(Self(T::default()));
            },
        };
        Ok(Self(parse_object(&body)))
    }
}

fn parse_object<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!("Request body does not match the expected shape: {}", e);
            T::default()
        }),
        _ => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRequest;

    #[test]
    fn test_non_objects_read_as_default() {
        for body in ["", "not json", "[\"question\"]", "\"question\"", "42", "null"] {
            let req: ChatRequest = parse_object(body.as_bytes());
            assert!(req.question.is_none(), "{:?} produced a question", body);
        }
    }

    #[test]
    fn test_object_is_parsed() {
        let req: ChatRequest = parse_object(br#"{"question": "Bonjour", "language": "fr"}"#);
        assert_eq!(req.question.as_deref(), Some("Bonjour"));
        assert_eq!(req.language.as_deref(), Some("fr"));
    }
}
