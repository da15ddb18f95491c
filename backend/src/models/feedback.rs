use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{ANONYMOUS_USER, lenient_string};
use crate::utils::ApiError;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    /// Integer from 1 to 5
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 5)]
    pub rating: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
}

/// Validated feedback. Logged, never stored.
#[derive(Debug, Validate)]
pub struct Feedback {
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    pub comment: String,
    pub user_id: String,
}

impl TryFrom<FeedbackRequest> for Feedback {
    type Error = ApiError;

    fn try_from(req: FeedbackRequest) -> Result<Self, Self::Error> {
        // Only JSON integers count; 4.0, "4" and true are rejected
        let rating =
            req.rating.as_ref().and_then(serde_json::Value::as_i64).ok_or(ApiError::InvalidRating)?;

        let feedback = Feedback {
            rating,
            comment: req.comment.unwrap_or_default(),
            user_id: req.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        };
        feedback.validate().map_err(|_| ApiError::InvalidRating)?;
        Ok(feedback)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub message: String,
    pub rating: i64,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(body: &str) -> Result<Feedback, ApiError> {
        Feedback::try_from(serde_json::from_str::<FeedbackRequest>(body).unwrap())
    }

    #[test]
    fn test_valid_ratings() {
        for rating in 1..=5 {
            let fb = feedback(&format!(r#"{{"rating": {}}}"#, rating)).unwrap();
            assert_eq!(fb.rating, rating);
            assert_eq!(fb.user_id, "anonymous");
            assert_eq!(fb.comment, "");
        }
    }

    #[test]
    fn test_invalid_ratings() {
        for body in [
            r#"{}"#,
            r#"{"rating": null}"#,
            r#"{"rating": 0}"#,
            r#"{"rating": 6}"#,
            r#"{"rating": -1}"#,
            r#"{"rating": 4.0}"#,
            r#"{"rating": "4"}"#,
            r#"{"rating": true}"#,
            r#"{"rating": [3]}"#,
        ] {
            assert!(matches!(feedback(body), Err(ApiError::InvalidRating)), "{} accepted", body);
        }
    }

    #[test]
    fn test_comment_and_user_kept() {
        let fb = feedback(r#"{"rating": 4, "comment": "Très utile", "user_id": "u-1"}"#).unwrap();
        assert_eq!(fb.comment, "Très utile");
        assert_eq!(fb.user_id, "u-1");
    }
}
