use anyhow::Context;
use std::process::ExitCode;
use tracing::{error, info};

use delete_slack_messages::core::config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    delete_slack_messages::setup_logging();
    let config = AppConfig::from_args();

    match delete_slack_messages::run(&config)
        .await
        .context("Failed to delete messages")
    {
        Ok(report) => {
            if report.executed {
                info!(
                    "Deleted {} messages across {} pages",
                    report.timestamps.len(),
                    report.pages
                );
                info!("Messages were successfully deleted.");
            } else {
                info!(
                    "Dry run finished: {} messages across {} pages would be deleted",
                    report.timestamps.len(),
                    report.pages
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
