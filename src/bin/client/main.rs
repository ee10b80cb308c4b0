use std::fmt::Display;
use std::time::Duration;

use clap::Parser;

use comment_load::config::{DEFAULT_CONCURRENT_REQUESTS, DEFAULT_URL};
use comment_load::{init_tracing, Dispatcher, LoadConfig, Message};

/// Command-line Argument of the comment load client
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Endpoint every comment is posted to
    #[arg(short = 'u', long, env = "COMMENT_LOAD_URL", default_value_t = String::from(DEFAULT_URL))]
    pub url: String,

    /// Worker pool size, also the number of times each message is sent
    #[arg(short = 'c', long, env = "COMMENT_LOAD_CONCURRENT_REQUESTS", default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    /// Message to send, as TYPE:TEXT. Repeat the flag for several messages
    ///
    /// Example: -m '1:message 1' -m '2:message 2'
    #[arg(short = 'm', long = "message", env = "COMMENT_LOAD_MESSAGE", default_value = "1:message 1")]
    pub messages: Vec<String>,

    /// Per-request timeout in milliseconds. Unbounded when not set
    #[arg(short = 't', long, env = "COMMENT_LOAD_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = format!("url: {}\n", self.url);
        let output = format!("{output}concurrent_requests: {}\n", self.concurrent_requests);
        let output = format!("{output}messages: {:?}\n", self.messages);
        let output = format!("{output}timeout_ms: {:?}", self.timeout_ms);
        f.write_str(output.as_str())
    }
}

impl TryFrom<Args> for LoadConfig {
    type Error = comment_load::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let messages = args
            .messages
            .iter()
            .map(|m| m.parse::<Message>())
            .collect::<Result<Vec<_>, _>>()?;
        LoadConfig {
            url: args.url,
            messages,
            concurrent_requests: args.concurrent_requests,
            timeout: args.timeout_ms.map(Duration::from_millis),
        }
        .validate()
    }
}

#[tokio::main]
async fn main() -> comment_load::Result<()> {
    init_tracing();
    let args = Args::parse();
    tracing::debug!("{}", args);

    let dispatcher = Dispatcher::new(LoadConfig::try_from(args)?)?;
    dispatcher.run().await;
    Ok(())
}
