//! Multimodal chat: history plus the new message in, text and images out.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use inspira_core::{ChatMessage, ChatReply, ImageAttachment};

use crate::ai_types::{Content, GenerateRequest, Part};
use crate::client::GeminiClient;
use crate::error::LlmError;

pub(crate) fn encode_image(image: &ImageAttachment) -> Part {
    Part::inline(image.mime_type.clone(), STANDARD.encode(&image.data))
}

fn to_content(message: &ChatMessage) -> Content {
    let mut parts: Vec<Part> = message.images.iter().map(encode_image).collect();
    if let Some(text) = message.text.as_deref().filter(|t| !t.trim().is_empty()) {
        parts.push(Part::text(text));
    }
    Content { role: Some(message.role.as_str().to_owned()), parts }
}

/// Split reply parts into text and decoded images.
///
/// # Errors
/// `MissingField` when an inline image is not valid base64.
pub(crate) fn reply_from_parts(parts: Vec<Part>) -> Result<ChatReply, LlmError> {
    let mut text = String::new();
    let mut images = Vec::new();
    for part in parts {
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(inline) = part.inline_data {
            let data = STANDARD
                .decode(inline.data.as_bytes())
                .map_err(|e| LlmError::MissingField(format!("image data (invalid base64: {e})")))?;
            images.push(ImageAttachment::new(inline.mime_type, data));
        }
    }
    Ok(ChatReply { text, images })
}

impl GeminiClient {
    /// Send `message` after `history` and return the model's reply.
    ///
    /// # Errors
    /// `InvalidInput` for an empty message; otherwise see [`GeminiClient::generate`].
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        message: &ChatMessage,
    ) -> Result<ChatReply, LlmError> {
        if message.is_empty() {
            return Err(LlmError::InvalidInput("message has neither text nor images".to_owned()));
        }
        let contents: Vec<Content> = history
            .iter()
            .filter(|m| !m.is_empty())
            .chain(std::iter::once(message))
            .map(to_content)
            .collect();
        let request = GenerateRequest {
            contents,
            system_instruction: None,
            generation_config: Some(self.generation_config()),
        };
        tracing::debug!(
            model = %self.model,
            history = history.len(),
            images = message.images.len(),
            "chat request"
        );
        reply_from_parts(self.generate(&request).await?)
    }
}
