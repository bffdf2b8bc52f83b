//! Conversation types for multimodal chat.
//!
//! Conversations are not persisted; callers hold the history and send it
//! along with each turn.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// Raw image bytes plus MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl ImageAttachment {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { mime_type: mime_type.into(), data }
    }

    /// File extension matching the MIME type, `bin` when unknown.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: Option<String>,
    pub images: Vec<ImageAttachment>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: Some(text.into()), images: Vec::new() }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Model, text: Some(text.into()), images: Vec::new() }
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.images.push(image);
        self
    }

    /// A message with neither text nor images has nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty()) && self.images.is_empty()
    }
}

/// Model output for a chat or image-generation turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub images: Vec<ImageAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_detection() {
        assert!(ChatMessage::user("   ").is_empty());
        assert!(!ChatMessage::user("hi").is_empty());
        let image_only = ChatMessage { role: ChatRole::User, text: None, images: vec![] }
            .with_image(ImageAttachment::new("image/png", vec![1, 2, 3]));
        assert!(!image_only.is_empty());
    }

    #[test]
    fn attachment_debug_hides_bytes() {
        let image = ImageAttachment::new("image/png", vec![0; 4096]);
        let rendered = format!("{image:?}");
        assert!(rendered.contains("4096"));
        assert!(rendered.len() < 100);
    }

    #[test]
    fn extension_from_mime() {
        assert_eq!(ImageAttachment::new("image/jpeg", vec![]).extension(), "jpg");
        assert_eq!(ImageAttachment::new("application/x-foo", vec![]).extension(), "bin");
    }
}
