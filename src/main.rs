use actix_web::web;
use clap::Parser;
use std::fmt::Display;

use comment_load::queue::TopicQueues;
use comment_load::{init_tracing, server};

/// Command-line Argument of comment-server
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// The set of IP address and port that the server binds
    ///
    /// Example: 'localhost:3000', '0.0.0.0:8080'
    #[arg(short = 'b', long, env = "COMMENT_SERVER_BIND", default_value_t = String::from("127.0.0.1:3000"))]
    pub bind: String,
}

impl Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bind: {}", self.bind)
    }
}

#[actix_web::main]
async fn main() -> comment_load::Result<()> {
    init_tracing();
    let args = Args::parse();
    tracing::info!("{}", args);

    let queues = web::Data::new(TopicQueues::new());
    let (server, addrs) = server::bind(args.bind.as_str(), queues)?;
    for addr in addrs {
        tracing::info!("Listening on http://{}/api/v1/comments", addr);
    }

    server.await?;
    Ok(())
}
