use super::messaging::{Comment, Topic};
use actix_web::web;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct TopicQueue {
    comments: Vec<Comment>,
    next_offset: u64,
}

/// In-memory per-topic FIFO queues holding pushed comments until consumed.
#[derive(Debug, Default)]
pub struct TopicQueues {
    hash: Mutex<HashMap<Topic, TopicQueue>>,
}

pub type Queues = web::Data<TopicQueues>;

impl TopicQueues {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Topic, TopicQueue>> {
        self.hash.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue data (Comment) to the given topic, creating the queue on first use.
    /// Returns the offset assigned to the comment within its topic.
    pub fn enqueue(&self, topic: Topic, data: Comment) -> u64 {
        let mut hash = self.lock();
        let queue = hash.entry(topic).or_default();
        let offset = queue.next_offset;
        queue.next_offset += 1;
        queue.comments.push(data);
        offset
    }

    /// Remove and return every queued comment of the topic, oldest first.
    pub fn drain(&self, topic: Topic) -> Vec<Comment> {
        match self.lock().get_mut(&topic) {
            Some(queue) => std::mem::take(&mut queue.comments),
            None => Vec::new(),
        }
    }

    /// Number of comments waiting in the topic.
    pub fn len(&self, topic: Topic) -> usize {
        self.lock().get(&topic).map_or(0, |queue| queue.comments.len())
    }

    pub fn is_empty(&self, topic: Topic) -> bool {
        self.len(topic) == 0
    }
}
