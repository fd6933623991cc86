//! Telegram update handlers.
//!
//! Every message lands on [`handle_message`]; only plain text that is not a
//! bot command reaches the relay. Everything else is dropped silently.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{Message, MessageEntityKind},
};

use relay_core::{domain::ChatId, relay::InboundMessage};

use crate::router::AppState;

mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if !is_relayable(&msg) {
        return Ok(());
    }
    text::handle_text(msg, state).await
}

/// Upstream filter: text messages that are not bot commands.
pub fn is_relayable(msg: &Message) -> bool {
    msg.text().is_some() && !is_command(msg)
}

fn is_command(msg: &Message) -> bool {
    msg.entities()
        .map(|entities| {
            entities
                .iter()
                .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
        })
        .unwrap_or(false)
}

pub fn inbound_from(msg: &Message) -> InboundMessage {
    InboundMessage {
        source_channel_id: ChatId(msg.chat.id.0),
        text: msg.text().map(str::to_string),
    }
}
