use inspira_core::extract_json_object;
use serde::de::DeserializeOwned;

use crate::ai_types::{GenerateRequest, GenerationConfig};
use crate::client::{GeminiClient, MAX_ERROR_CONTEXT_LEN, joined_text, truncate};
use crate::error::LlmError;

impl GeminiClient {
    /// Ask for a JSON reply and deserialize it into `T`.
    ///
    /// # Errors
    /// `JsonParse` when the reply is not the expected JSON, otherwise see
    /// [`GeminiClient::generate`].
    pub async fn complete_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let request = GenerateRequest {
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_owned()),
                ..self.generation_config()
            }),
            ..GenerateRequest::from_text(prompt)
        };
        let text = joined_text(&self.generate(&request).await?);
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        let content = extract_json_object(&text);
        serde_json::from_str(content).map_err(|e| LlmError::JsonParse {
            context: format!("model JSON (content: {})", truncate(content, MAX_ERROR_CONTEXT_LEN)),
            source: e,
        })
    }
}
