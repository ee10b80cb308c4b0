use thiserror::Error;

/// Setup-time failures. Per-request transport failures are reported as
/// [`crate::sender::Outcome::Failed`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed message '{0}', expected TYPE:TEXT")]
    MalformedMessage(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
