use inspira_core::{ChatReply, ImageAttachment};

use crate::ai_types::{Content, GenerateRequest, GenerationConfig, Part};
use crate::chat::{encode_image, reply_from_parts};
use crate::client::GeminiClient;
use crate::error::LlmError;

impl GeminiClient {
    /// Generate an image from `prompt`, optionally guided by reference images.
    ///
    /// # Errors
    /// `InvalidInput` for a blank prompt, `MissingField("image")` when the
    /// reply carries no image, otherwise see [`GeminiClient::generate`].
    pub async fn generate_image(
        &self,
        prompt: &str,
        references: &[ImageAttachment],
    ) -> Result<ChatReply, LlmError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(LlmError::InvalidInput("image prompt is empty".to_owned()));
        }
        let mut parts: Vec<Part> = references.iter().map(encode_image).collect();
        parts.push(Part::text(prompt));

        let request = GenerateRequest {
            contents: vec![Content::user(parts)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_owned(), "IMAGE".to_owned()]),
                ..self.generation_config()
            }),
        };
        let reply = reply_from_parts(self.generate(&request).await?)?;
        if reply.images.is_empty() {
            return Err(LlmError::MissingField("image".to_owned()));
        }
        tracing::info!(model = %self.model, images = reply.images.len(), "image generated");
        Ok(reply)
    }
}
