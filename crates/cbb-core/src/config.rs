use std::{env, fs, path::Path};

use crate::{
    domain::ChatId,
    errors::Error,
    Result,
};

/// Typed configuration, built once at startup and passed by reference.
///
/// Both settings are required; the process refuses to start without them.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// The single channel whose membership events are acted on.
    pub target_channel: ChatId,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_parts(env_str("TELEGRAM_BOT_TOKEN"), env_str("CHANNEL_ID"))
    }

    /// Validate raw settings into a config. Split out from [`Config::load`]
    /// so validation is testable without touching process env.
    pub fn from_parts(token: Option<String>, channel_id: Option<String>) -> Result<Self> {
        let telegram_bot_token = token.and_then(non_empty).ok_or_else(|| {
            Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
        })?;

        let raw_channel = channel_id.and_then(non_empty).ok_or_else(|| {
            Error::Config("CHANNEL_ID environment variable is required".to_string())
        })?;

        let target_channel = raw_channel
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| Error::Config(format!("CHANNEL_ID must be a number, got {raw_channel:?}")))?;

        Ok(Self {
            telegram_bot_token,
            target_channel,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

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
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
