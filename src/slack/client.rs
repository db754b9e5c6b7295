//! Slack API client module
//!
//! Wraps the two Web API methods needed to clear a channel:
//! `conversations.history` and `chat.delete`.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::models::{DeleteReport, DeleteRequest, HistoryPage};
use crate::errors::SlackError;
use crate::slack::throttle::Throttle;

const HISTORY_METHOD: &str = "conversations.history";
const DELETE_METHOD: &str = "chat.delete";

fn build_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Parse the API host, making sure it ends with `/` so method names join
/// underneath it instead of replacing its last path segment.
fn parse_api_host(api_host: &str) -> Result<Url, SlackError> {
    let mut host = api_host.trim().to_string();
    if !host.ends_with('/') {
        host.push('/');
    }
    let url = Url::parse(&host)?;
    if url.cannot_be_a_base() {
        return Err(SlackError::RequestError(format!(
            "API host is not a base URL: {api_host}"
        )));
    }
    Ok(url)
}

/// Form parameters for `conversations.history`. An empty cursor means the
/// first page and is left out.
#[must_use]
fn build_history_form<'a>(
    token: &'a str,
    channel: &'a str,
    cursor: &'a str,
) -> Vec<(&'static str, &'a str)> {
    let mut form = vec![("token", token), ("channel", channel)];
    if !cursor.is_empty() {
        form.push(("cursor", cursor));
    }
    form
}

/// Slack client bound to a single channel.
pub struct SlackClient {
    token: String,
    channel_id: String,
    api_host: Url,
    http: Client,
    throttle: Throttle,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns `SlackError::RequestError` if `api_host` is not a valid base URL.
    pub fn new(token: String, channel_id: String, api_host: &str) -> Result<Self, SlackError> {
        Ok(Self {
            token,
            channel_id,
            api_host: parse_api_host(api_host)?,
            http: build_http_client(),
            throttle: Throttle::default(),
        })
    }

    #[must_use]
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    #[must_use]
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn endpoint(&self, method: &str) -> Result<Url, SlackError> {
        Ok(self.api_host.join(method)?)
    }

    /// Fetch one page of channel history starting at `cursor`.
    ///
    /// The caller is responsible for checking `ok` on the returned page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body is not a
    /// valid history response.
    pub async fn fetch_history_page(&self, cursor: &str) -> Result<HistoryPage, SlackError> {
        let url = self.endpoint(HISTORY_METHOD)?;
        let form = build_history_form(&self.token, &self.channel_id, cursor);

        let result = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .form(&form)
            .send()
            .await;
        self.throttle.pause().await;

        let resp = result.map_err(|e| match SlackError::from(e) {
            SlackError::HttpError(msg) => {
                SlackError::HttpError(format!("{HISTORY_METHOD} request failed: {msg}"))
            }
            other => other,
        })?;

        if !resp.status().is_success() {
            warn!("{} returned HTTP {}", HISTORY_METHOD, resp.status());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SlackError::HttpError(format!("{HISTORY_METHOD} body read failed: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| SlackError::ParseError(format!("{HISTORY_METHOD} response: {e}")))
    }

    /// Delete the message posted at `ts`. Does nothing unless `execute` is set.
    ///
    /// The raw response body is logged and not inspected, so an `ok: false`
    /// answer from Slack does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent, or its body
    /// cannot be read.
    pub async fn delete_one(&self, ts: &str, execute: bool) -> Result<(), SlackError> {
        if !execute {
            debug!("Dry run, not deleting message {}", ts);
            return Ok(());
        }

        let url = self.endpoint(DELETE_METHOD)?;
        let payload = DeleteRequest {
            channel: &self.channel_id,
            ts,
        };

        let result = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await;
        self.throttle.pause().await;

        let resp = result.map_err(|e| match SlackError::from(e) {
            SlackError::HttpError(msg) => {
                SlackError::HttpError(format!("{DELETE_METHOD} request failed: {msg}"))
            }
            other => other,
        })?;

        let body = resp
            .text()
            .await
            .map_err(|e| SlackError::HttpError(format!("{DELETE_METHOD} body read failed: {e}")))?;
        info!("body: {}", body);

        Ok(())
    }

    /// Delete every message in `page` and in all pages that follow it.
    ///
    /// Pages are processed in the order Slack returns them and messages in
    /// page order. The walk stops at the first page with `has_more` unset.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::ApiError` carrying Slack's error code as soon as a
    /// page reports `ok: false`, before any of its messages are touched. Any
    /// fetch or delete error ends the walk as well.
    pub async fn delete_all(
        &self,
        first_page: HistoryPage,
        execute: bool,
    ) -> Result<DeleteReport, SlackError> {
        let mut report = DeleteReport {
            executed: execute,
            ..DeleteReport::default()
        };
        let mut page = first_page;

        loop {
            if !page.ok {
                return Err(SlackError::ApiError(format!(
                    "can't get messages: {}",
                    page.error_message
                )));
            }
            report.pages += 1;

            for message in &page.messages {
                if let Some(label) = message.label() {
                    info!("delete a message: {}", label);
                }
                self.delete_one(&message.ts, execute).await?;
                report.timestamps.push(message.ts.clone());
            }

            if !page.has_more {
                return Ok(report);
            }

            let cursor = page.next_cursor().to_string();
            info!("next cursor: {}", cursor);
            page = self.fetch_history_page(&cursor).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_host_appends_slash() {
        let url = parse_api_host("https://slack.com/api").unwrap();
        assert_eq!(url.as_str(), "https://slack.com/api/");
        assert_eq!(
            url.join(HISTORY_METHOD).unwrap().as_str(),
            "https://slack.com/api/conversations.history"
        );
    }

    #[test]
    fn test_parse_api_host_rejects_garbage() {
        let err = parse_api_host("not a url").unwrap_err();
        assert!(matches!(err, SlackError::RequestError(_)));
    }

    #[test]
    fn test_parse_api_host_rejects_non_base() {
        let err = parse_api_host("mailto:ops@example.com").unwrap_err();
        assert!(matches!(err, SlackError::RequestError(_)));
    }

    #[test]
    fn test_history_form_without_cursor() {
        let form = build_history_form("xoxp-1", "C123", "");
        assert_eq!(form, vec![("token", "xoxp-1"), ("channel", "C123")]);
    }

    #[test]
    fn test_history_form_with_cursor() {
        let form = build_history_form("xoxp-1", "C123", "dXNlcjpVMEc5V0ZYTlo=");
        assert_eq!(form.last(), Some(&("cursor", "dXNlcjpVMEc5V0ZYTlo=")));
    }

    #[test]
    fn test_endpoint_joins_method() {
        let client =
            SlackClient::new("t".to_string(), "C1".to_string(), "http://localhost:9/api/").unwrap();
        assert_eq!(
            client.endpoint(DELETE_METHOD).unwrap().as_str(),
            "http://localhost:9/api/chat.delete"
        );
        assert_eq!(client.channel_id(), "C1");
    }

    #[tokio::test]
    async fn test_dry_run_delete_makes_no_request() {
        // Nothing listens on port 9, so any request would fail.
        let client = SlackClient::new("t".to_string(), "C1".to_string(), "http://127.0.0.1:9/")
            .unwrap()
            .with_throttle(Throttle::new(Duration::ZERO));

        assert!(client.delete_one("111", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_all_rejects_failed_page() {
        let client = SlackClient::new("t".to_string(), "C1".to_string(), "http://127.0.0.1:9/")
            .unwrap()
            .with_throttle(Throttle::new(Duration::ZERO));
        let page = HistoryPage {
            ok: false,
            error_message: "not_in_channel".to_string(),
            ..HistoryPage::default()
        };

        let err = client.delete_all(page, true).await.unwrap_err();
        match err {
            SlackError::ApiError(msg) => assert!(msg.contains("not_in_channel")),
            other => panic!("Expected ApiError, got: {other:?}"),
        }
    }
}
