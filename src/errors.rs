use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to build Slack API request: {0}")]
    RequestError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to parse Slack API response: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            SlackError::RequestError(error.to_string())
        } else if error.is_decode() {
            SlackError::ParseError(error.to_string())
        } else {
            SlackError::HttpError(error.to_string())
        }
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(error: serde_json::Error) -> Self {
        SlackError::ParseError(error.to_string())
    }
}

impl From<url::ParseError> for SlackError {
    fn from(error: url::ParseError) -> Self {
        SlackError::RequestError(error.to_string())
    }
}
