use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::{LoadConfig, Message};
use crate::error::Result;

/// What became of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The HTTP exchange completed. Any status counts, 4xx and 5xx included.
    Delivered { status: u16 },
    /// The exchange never completed (refused, timed out, unresolved host...).
    Failed { error: String },
}

impl Outcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Delivered { status } => Some(*status),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Delivered { .. } => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}

/// Posts comments to one endpoint. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Sender {
    client: Client,
    url: String,
}

impl Sender {
    pub fn new(config: &LoadConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one comment. Transport failures are logged and folded into
    /// [`Outcome::Failed`]; they never escape as errors.
    pub async fn send(&self, message: &Message) -> Outcome {
        let body = message.to_comment();
        let res = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await;

        match res {
            Ok(res) => {
                let status = res.status().as_u16();
                tracing::info!(
                    "Sent message '{}' of type {}, Response: {}",
                    message.text,
                    message.comment_type,
                    status
                );
                Outcome::Delivered { status }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to send message '{}' of type {}, Error: {}",
                    message.text,
                    message.comment_type,
                    e
                );
                Outcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
