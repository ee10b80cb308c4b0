use std::str::FromStr;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::{Error, Result};
use crate::messaging::Comment;

pub const DEFAULT_URL: &str = "http://localhost:3000/api/v1/comments";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 100;

/// A configured message, written `TYPE:TEXT` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub comment_type: i32,
}

impl Message {
    pub fn new(text: impl Into<String>, comment_type: i32) -> Self {
        Self {
            text: text.into(),
            comment_type,
        }
    }

    pub fn to_comment(&self) -> Comment {
        Comment::new(self.text.clone(), self.comment_type)
    }
}

impl FromStr for Message {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (comment_type, text) = s
            .split_once(':')
            .ok_or_else(|| Error::MalformedMessage(s.to_string()))?;
        let comment_type = comment_type
            .trim()
            .parse()
            .map_err(|_| Error::MalformedMessage(s.to_string()))?;
        Ok(Self::new(text, comment_type))
    }
}

/// Everything the dispatcher needs to run one batch.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub url: String,
    pub messages: Vec<Message>,
    /// Worker pool size, and also how many times each message is sent.
    pub concurrent_requests: usize,
    /// Per-request timeout handed to the HTTP client. `None` leaves it unbounded.
    pub timeout: Option<Duration>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_URL),
            messages: vec![Message::new("message 1", 1)],
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            timeout: None,
        }
    }
}

impl LoadConfig {
    pub fn validate(self) -> Result<Self> {
        if self.concurrent_requests == 0 {
            return Err(Error::InvalidConfig(
                "concurrent_requests must be at least 1".to_string(),
            ));
        }
        if self.concurrent_requests > Semaphore::MAX_PERMITS {
            return Err(Error::InvalidConfig(format!(
                "concurrent_requests must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.messages.is_empty() {
            return Err(Error::InvalidConfig("no messages configured".to_string()));
        }
        let parsed = reqwest::Url::parse(&self.url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{}: unsupported scheme",
                self.url
            )));
        }
        Ok(self)
    }

    /// Total number of requests one run issues.
    pub fn total_requests(&self) -> usize {
        self.messages.len() * self.concurrent_requests
    }
}
