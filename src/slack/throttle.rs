//! Fixed-delay pacing for Slack Web API calls.
//!
//! Calls are issued strictly one after another, so pausing for a fixed
//! interval after each one keeps the request rate under the method's tier.

use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the configured interval. Called after every API call,
    /// whether it succeeded or not.
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("Pausing {:?} for rate limiting", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::core::config::DEFAULT_DELAY_MS))
    }
}
