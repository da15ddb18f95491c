use std::sync::Arc;

use crate::config::{ChatProfileConfig, LLMConfig};
use crate::models::Question;
use crate::services::language::Language;
use crate::services::llm::{CompletionRequest, LLMClient, LLMError, prompts};

/// Composes the prompt for a question and delegates it to the provider.
/// Stateless: nothing is carried between calls.
pub struct ChatService {
    client: Arc<dyn LLMClient>,
    model: String,
    temperature: f32,
}

impl ChatService {
    pub fn new(client: Arc<dyn LLMClient>, config: &LLMConfig) -> Self {
        Self { client, model: config.model.clone(), temperature: config.temperature }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Ask the provider and return its trimmed answer
    pub async fn ask(
        &self,
        question: &Question,
        language: Language,
        profile: &ChatProfileConfig,
    ) -> Result<String, LLMError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: prompts::build_messages(&question.text, language),
            temperature: self.temperature,
            max_tokens: profile.max_tokens,
        };

        let answer = self.client.complete(&request).await?;
        Ok(answer.trim().to_string())
    }
}
