//! delete-slack-messages - remove messages from a Slack channel.
//!
//! Walks a channel's history with `conversations.history` and removes each
//! message with `chat.delete`, or removes a single message by timestamp.
//! Runs are dry by default and only log what would be deleted.
//!
//! Calls are made one at a time and each is followed by a fixed pause to
//! stay under Slack's per-method rate limit.
//!
//! # Example
//!
//! ```no_run
//! use delete_slack_messages::core::config::AppConfig;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     delete_slack_messages::setup_logging();
//!
//!     let config = AppConfig::try_from_args([
//!         "delete-slack-messages",
//!         "-token",
//!         "xoxp-dummy",
//!         "-channel",
//!         "C12345678",
//!     ])?;
//!     let report = delete_slack_messages::run(&config).await?;
//!     println!("Visited {} messages", report.timestamps.len());
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod core;
pub mod errors;
pub mod slack;

use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::core::models::DeleteReport;
use crate::errors::SlackError;
use crate::slack::{SlackClient, Throttle};

/// Configure logging for the command line.
///
/// Human-readable lines on stderr, filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// delete_slack_messages::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Delete the configured message, or every message in the channel when no
/// timestamp is given.
///
/// In single-message mode the history endpoint is never called and the
/// report holds just that timestamp with `pages == 0`.
///
/// # Errors
///
/// Returns the first request, transport or decoding error, or the API error
/// of a history page that came back with `ok: false`.
pub async fn run(config: &AppConfig) -> Result<DeleteReport, SlackError> {
    if config.token.is_empty() {
        warn!("No token given, Slack will reject the requests");
    }

    let client = SlackClient::new(
        config.token.clone(),
        config.channel_id.clone(),
        &config.api_host,
    )?
    .with_throttle(Throttle::new(config.delay()));

    if !config.execute {
        info!("Dry run: nothing will be deleted. Pass -execute to delete messages.");
    }

    match config.target_timestamp() {
        None => {
            info!("Will delete all messages in the channel.");
            let history = client.fetch_history_page("").await?;
            client.delete_all(history, config.execute).await
        }
        Some(ts) => {
            info!(
                "Will delete the message posted at {} in the channel ID: {}",
                ts, config.channel_id
            );
            client.delete_one(ts, config.execute).await?;
            Ok(DeleteReport {
                pages: 0,
                timestamps: vec![ts.to_string()],
                executed: config.execute,
            })
        }
    }
}
