use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::MessagingCapabilities,
    Result,
};

/// Outbound messenger port.
///
/// Implementations map transport failures into [`crate::Error`], using
/// `Error::Unauthorized` when the bot credential was rejected.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    /// Send plain text (no parse mode) to a chat.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
}
