use std::{env, fs, path::Path};

use crate::{domain::ChatId, errors::Error, Result};

pub const DEFAULT_SOURCE_CHAT_ID: i64 = -1003160364537;
pub const DEFAULT_DESTINATION_CHAT_ID: i64 = -1003003382573;
pub const DEFAULT_TRIGGER_TOKEN: &str = "@OpsUpdatesBot";

/// Typed, immutable relay configuration.
///
/// Built once at startup and shared read-only for the life of the process.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub source_channel_id: ChatId,
    pub destination_channel_id: ChatId,
    pub trigger_token: String,
}

impl Config {
    /// Load from the process environment (after applying `.env`, if any).
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Required
        let bot_token = lookup("BOT_TOKEN")
            .and_then(non_empty)
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN").and_then(non_empty))
            .ok_or_else(|| {
                Error::Config("BOT_TOKEN environment variable is required".to_string())
            })?;

        let source_channel_id = ChatId(
            parse_i64(&lookup, "RELAY_SOURCE_CHAT_ID")?.unwrap_or(DEFAULT_SOURCE_CHAT_ID),
        );
        let destination_channel_id = ChatId(
            parse_i64(&lookup, "RELAY_DESTINATION_CHAT_ID")?
                .unwrap_or(DEFAULT_DESTINATION_CHAT_ID),
        );

        let trigger_token = match lookup("RELAY_TRIGGER_TOKEN") {
            None => DEFAULT_TRIGGER_TOKEN.to_string(),
            Some(v) if v.trim().is_empty() => {
                return Err(Error::Config(
                    "RELAY_TRIGGER_TOKEN must not be blank".to_string(),
                ))
            }
            Some(v) => v.trim().to_string(),
        };

        Ok(Self {
            bot_token,
            source_channel_id,
            destination_channel_id,
            trigger_token,
        })
    }
}

fn parse_i64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<i64>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key} must be an integer chat id: {e}")))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "   ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn defaults_match_the_ops_channels() {
        let cfg = Config::from_lookup(lookup(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(cfg.bot_token, "123:abc");
        assert_eq!(cfg.source_channel_id, ChatId(-1003160364537));
        assert_eq!(cfg.destination_channel_id, ChatId(-1003003382573));
        assert_eq!(cfg.trigger_token, "@OpsUpdatesBot");
    }

    #[test]
    fn falls_back_to_telegram_bot_token() {
        let cfg = Config::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "t")])).unwrap();
        assert_eq!(cfg.bot_token, "t");
    }

    #[test]
    fn overrides_channels_and_trigger() {
        let cfg = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("RELAY_SOURCE_CHAT_ID", " -42 "),
            ("RELAY_DESTINATION_CHAT_ID", "7"),
            ("RELAY_TRIGGER_TOKEN", "@Other"),
        ]))
        .unwrap();
        assert_eq!(cfg.source_channel_id, ChatId(-42));
        assert_eq!(cfg.destination_channel_id, ChatId(7));
        assert_eq!(cfg.trigger_token, "@Other");
    }

    #[test]
    fn rejects_bad_chat_id_and_blank_trigger() {
        let err =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("RELAY_SOURCE_CHAT_ID", "abc")]))
                .unwrap_err();
        assert!(err.to_string().contains("RELAY_SOURCE_CHAT_ID"));

        let err =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("RELAY_TRIGGER_TOKEN", " ")]))
                .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn dotenv_parsing_skips_comments_and_strips_quotes() {
        let parsed = parse_dotenv("# comment\n\nBOT_TOKEN=\"abc\"\nRELAY_TRIGGER_TOKEN='@X'\nnoequals\n");
        assert_eq!(
            parsed,
            vec![
                ("BOT_TOKEN".to_string(), "abc".to_string()),
                ("RELAY_TRIGGER_TOKEN".to_string(), "@X".to_string()),
            ]
        );
    }
}
