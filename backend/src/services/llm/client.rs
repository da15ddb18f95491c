//! LLM client abstraction and the OpenAI-compatible implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::models::{ChatCompletionResponse, CompletionRequest, LLMError};
use crate::config::LLMConfig;

/// Completion provider seam. Handlers only ever see this trait.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Run one completion and return the trimmed answer text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LLMError>;

    /// Whether a credential is configured (not whether it is valid)
    fn is_configured(&self) -> bool;
}

pub struct OpenAIClient {
    http_client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl OpenAIClient {
    pub fn new(config: &LLMConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LLMError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("OpenAI API key is not configured");
            return Err(LLMError::Authentication);
        };

        tracing::debug!(
            "Calling {} with model={} max_tokens={}",
            self.endpoint(),
            request.model,
            request.max_tokens
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Unknown("request timed out".to_string())
                } else {
                    LLMError::Unknown(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LLMError::Unknown(format!("invalid completion body: {}", e)))?;

        completion
            .first_content()
            .ok_or_else(|| LLMError::Unknown("completion has no content".to_string()))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Map a non-success provider status to an error category
pub(crate) fn classify_status(status: StatusCode, body: &str) -> LLMError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            tracing::error!("OpenAI authentication error ({})", status);
            LLMError::Authentication
        },
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::error!("OpenAI rate limit exceeded");
            LLMError::RateLimited
        },
        _ => {
            let snippet: String = body.chars().take(200).collect();
            tracing::error!("OpenAI API error: HTTP {} {}", status, snippet);
            LLMError::Api(format!("HTTP {}", status))
        },
    }
}
