//! Telegram adapter (teloxide).
//!
//! This crate implements the `relay-core` MessagingPort over Telegram Bot API
//! and runs the long-polling dispatcher.

use async_trait::async_trait;

use teloxide::{prelude::*, ApiError, RequestError};

pub mod handlers;
pub mod router;

use relay_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::MessagingCapabilities},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: RequestError) -> Error {
        match e {
            RequestError::Api(api) if is_auth_failure(&api) => Error::Unauthorized(api.to_string()),
            other => Error::External(format!("telegram error: {other}")),
        }
    }
}

/// Errors Telegram reports as 401/403: the token or the bot's access was rejected.
fn is_auth_failure(e: &ApiError) -> bool {
    matches!(
        e,
        // `NotFound` is teloxide's name for Telegram's 401 "Unauthorized" reply.
        ApiError::NotFound
            | ApiError::BotBlocked
            | ApiError::BotKicked
            | ApiError::BotKickedFromSupergroup
    )
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: 4096,
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        // Single attempt; a failed relay is logged upstream and dropped.
        let msg = self
            .bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }
}
