use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::time::Duration;

/// Slack Web API base URL.
pub const DEFAULT_API_HOST: &str = "https://slack.com/api/";

/// Pause after every API call. Slack allows roughly 50 calls per minute on
/// `conversations.history` and `chat.delete`.
pub const DEFAULT_DELAY_MS: u64 = 1000;

const LONG_FLAGS: &[&str] = &[
    "token",
    "channel",
    "timestamp",
    "execute",
    "api-host",
    "delay-ms",
    "help",
    "version",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "delete-slack-messages")]
#[command(version, about = "Delete messages in a Slack channel")]
pub struct AppConfig {
    /// Slack user token.
    #[arg(long, default_value = "")]
    pub token: String,

    /// Target channel ID.
    #[arg(long = "channel", default_value = "")]
    pub channel_id: String,

    /// Target message timestamp. If this is not provided, all messages in the
    /// target channel are deleted.
    #[arg(long, default_value = "")]
    pub timestamp: String,

    /// Actually delete messages. Without this flag the run is a dry run that
    /// only logs what would be deleted.
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub execute: bool,

    /// Slack Web API base URL.
    #[arg(long, default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Pause after each API call, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,
}

impl AppConfig {
    /// Parse process arguments, accepting `-flag` as well as `--flag`.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// # Errors
    ///
    /// Returns a clap error when the arguments are invalid.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// The single message to delete, or `None` to walk the whole history.
    #[must_use]
    pub fn target_timestamp(&self) -> Option<&str> {
        if self.timestamp.is_empty() {
            None
        } else {
            Some(&self.timestamp)
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Rewrite single-dash long flags (`-token x`, `-execute=true`) into the
/// double-dash form clap expects. Only known flag names are rewritten and
/// everything after a bare `--` is passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{s}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
