use std::sync::Arc;

use inspira_core::{ChatMessage, ChatReply, ImageAttachment, ModelPurpose};

use crate::ServiceError;
use crate::model_config_service::ModelConfigService;

/// Stateless multimodal chat; the caller owns the conversation history.
pub struct ChatService {
    models: Arc<ModelConfigService>,
}

impl ChatService {
    #[must_use]
    pub fn new(models: Arc<ModelConfigService>) -> Self {
        Self { models }
    }

    pub async fn chat(
        &self,
        history: &[ChatMessage],
        message: &ChatMessage,
    ) -> Result<ChatReply, ServiceError> {
        if message.is_empty() {
            return Err(ServiceError::InvalidInput(
                "message needs text or at least one image".to_owned(),
            ));
        }
        let client = self.models.resolve_client(ModelPurpose::Chat).await?;
        let reply = client.chat(history, message).await?;
        tracing::info!(
            history = history.len(),
            reply_chars = reply.text.len(),
            reply_images = reply.images.len(),
            "chat reply"
        );
        Ok(reply)
    }

    pub async fn generate_image(
        &self,
        prompt: &str,
        references: &[ImageAttachment],
    ) -> Result<ChatReply, ServiceError> {
        if prompt.trim().is_empty() {
            return Err(ServiceError::InvalidInput("prompt must not be empty".to_owned()));
        }
        let client = self.models.resolve_client(ModelPurpose::Image).await?;
        Ok(client.generate_image(prompt, references).await?)
    }
}
