use crate::config::{LoadConfig, Message};
use crate::error::Result;
use crate::pool::WorkerPool;
use crate::sender::{Outcome, Sender};

/// One completed task: the message that was posted and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub message: Message,
    pub outcome: Outcome,
}

/// Repeat each message `concurrent_requests` times, message by message.
pub fn plan(config: &LoadConfig) -> Vec<Message> {
    config
        .messages
        .iter()
        .flat_map(|msg| std::iter::repeat(msg).take(config.concurrent_requests))
        .cloned()
        .collect()
}

/// Fans the planned batch out over a bounded worker pool.
#[derive(Debug)]
pub struct Dispatcher {
    config: LoadConfig,
    sender: Sender,
    pool: WorkerPool,
}

impl Dispatcher {
    pub fn new(config: LoadConfig) -> Result<Self> {
        let config = config.validate()?;
        let sender = Sender::new(&config)?;
        let pool = WorkerPool::new(config.concurrent_requests)?;
        Ok(Self {
            config,
            sender,
            pool,
        })
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Send the whole batch and return once every task has finished.
    /// The result vector follows the plan order, one entry per task.
    pub async fn run(&self) -> Vec<TaskResult> {
        let tasks = plan(&self.config);
        tracing::info!(
            "Dispatching {} requests to {} with {} workers",
            tasks.len(),
            self.sender.url(),
            self.pool.size()
        );

        let joined = self
            .pool
            .run(tasks.clone(), |message| {
                let sender = self.sender.clone();
                async move { sender.send(&message).await }
            })
            .await;

        let results: Vec<TaskResult> = tasks
            .into_iter()
            .zip(joined)
            .map(|(message, joined)| {
                let outcome = joined.unwrap_or_else(|e| {
                    tracing::error!(
                        "Task for message '{}' of type {} did not complete: {}",
                        message.text,
                        message.comment_type,
                        e
                    );
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                });
                TaskResult { message, outcome }
            })
            .collect();

        tracing::info!("All {} requests completed", results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_is_message_major_cross_product() {
        let config = LoadConfig {
            messages: vec![Message::new("a", 1), Message::new("b", 2)],
            concurrent_requests: 3,
            ..Default::default()
        };
        let tasks = plan(&config);
        let texts: Vec<_> = tasks.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["a", "a", "a", "b", "b", "b"]);
        assert_eq!(tasks.len(), config.total_requests());
    }

    #[test]
    fn default_plan_has_one_hundred_tasks() {
        let tasks = plan(&LoadConfig::default());
        assert_eq!(tasks.len(), 100);
        assert!(tasks.iter().all(|m| *m == Message::new("message 1", 1)));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = LoadConfig {
            concurrent_requests: 0,
            ..Default::default()
        };
        assert!(Dispatcher::new(config).is_err());
    }

    #[test]
    fn new_rejects_oversized_pool_without_panicking() {
        let config = LoadConfig {
            concurrent_requests: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            Dispatcher::new(config),
            Err(crate::error::Error::InvalidConfig(_))
        ));
    }
}
