use std::collections::VecDeque;

use crate::domain::Post;

/// FIFO of posts waiting for render and print.
///
/// At most one job is in flight: the head is handed out once, and the next
/// head only after `complete` is called for the current one.
#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    jobs: VecDeque<Post>,
    in_flight: bool,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append posts. Returns the head to dispatch when the queue was idle.
    pub fn enqueue(&mut self, posts: impl IntoIterator<Item = Post>) -> Option<Post> {
        self.jobs.extend(posts);
        if self.in_flight {
            return None;
        }
        self.dispatch_head()
    }

    /// Finish the in-flight job, success or failure alike. Returns the next
    /// head to dispatch, or `None` once drained.
    pub fn complete(&mut self, post_id: &str) -> Option<Post> {
        if !self.in_flight {
            tracing::warn!("completion for {} with no job in flight", post_id);
            return None;
        }
        match self.jobs.front() {
            Some(head) if head.id == post_id => {
                self.jobs.pop_front();
            }
            _ => {
                tracing::warn!("completion for {} does not match queue head", post_id);
                return None;
            }
        }
        self.in_flight = false;
        self.dispatch_head()
    }

    pub fn is_idle(&self) -> bool {
        !self.in_flight
    }

    pub fn head(&self) -> Option<&Post> {
        self.jobs.front()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn dispatch_head(&mut self) -> Option<Post> {
        let head = self.jobs.front().cloned()?;
        self.in_flight = true;
        Some(head)
    }
}
