//! The relay filter: decide whether an inbound message is forwarded, and
//! what the forwarded text looks like.

use chrono::{Local, NaiveDateTime};

use crate::{config::Config, domain::ChatId};

/// Wall-clock format appended to relayed text, e.g. `10/02 04:49`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d %H:%M";

/// A message as seen by the relay, independent of the messenger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    pub source_channel_id: ChatId,
    pub text: Option<String>,
}

/// A send request produced by the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub destination_channel_id: ChatId,
    pub text: String,
    /// Text left after stripping the trigger token (for logging).
    pub payload: String,
}

/// Run the filter against the current local time.
pub fn handle(msg: &InboundMessage, cfg: &Config) -> Option<OutboundMessage> {
    handle_at(msg, cfg, Local::now().naive_local())
}

/// Run the filter with an explicit local time.
pub fn handle_at(
    msg: &InboundMessage,
    cfg: &Config,
    now: NaiveDateTime,
) -> Option<OutboundMessage> {
    if msg.source_channel_id != cfg.source_channel_id {
        return None;
    }

    let text = msg.text.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }

    let rest = strip_prefix_ignore_case(text, &cfg.trigger_token)?;
    let payload = rest.trim().to_string();

    // An empty payload still relays (" at MM/DD HH:MM").
    let text = format!("{payload} at {}", format_timestamp(now));

    Some(OutboundMessage {
        destination_channel_id: cfg.destination_channel_id,
        text,
        payload,
    })
}

pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Strip `prefix` from the start of `text`, comparing char by char with
/// Unicode lowercase folding. Matching is prefix-based, not whole-word.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for want in prefix.chars() {
        let (_, got) = chars.next()?;
        if !got.to_lowercase().eq(want.to_lowercase()) {
            return None;
        }
    }
    Some(chars.as_str())
}
