//! All Slack-specific functionality

pub mod client;
pub mod throttle;

// Re-export main types for convenience
pub use client::SlackClient;
pub use throttle::Throttle;
