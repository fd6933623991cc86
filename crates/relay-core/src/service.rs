use std::sync::Arc;

use crate::{
    config::Config,
    domain::MessageRef,
    errors::Error,
    messaging::port::MessagingPort,
    relay::{self, InboundMessage},
};

/// What happened to one inbound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    Dropped,
    Relayed(MessageRef),
    Failed,
}

/// Filter + send, with every failure contained at this boundary.
pub struct RelayService {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
}

impl RelayService {
    pub fn new(cfg: Arc<Config>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self { cfg, messenger }
    }

    /// Handle one inbound message. Never returns an error; send failures are
    /// logged and the message is dropped without retry.
    pub async fn on_message(&self, msg: InboundMessage) -> RelayOutcome {
        let Some(out) = relay::handle(&msg, &self.cfg) else {
            tracing::debug!(chat_id = %msg.source_channel_id, "message ignored");
            return RelayOutcome::Dropped;
        };

        let max_len = self.messenger.capabilities().max_message_len;
        if out.text.chars().count() > max_len {
            tracing::warn!(
                len = out.text.chars().count(),
                max_len,
                "relayed text exceeds messenger limit"
            );
        }

        match self
            .messenger
            .send_text(out.destination_channel_id, &out.text)
            .await
        {
            Ok(sent) => {
                tracing::info!(
                    "Triggered by '{}'. Sent to {}",
                    out.payload,
                    out.destination_channel_id
                );
                RelayOutcome::Relayed(sent)
            }
            Err(Error::Unauthorized(e)) => {
                tracing::error!(
                    "Unauthorized ({e}). Check BOT_TOKEN is correct and has not been revoked."
                );
                RelayOutcome::Failed
            }
            Err(e) => {
                tracing::error!("An error occurred: {e}");
                RelayOutcome::Failed
            }
        }
    }
}
