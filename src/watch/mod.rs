//! Space watching core: deduplication of polled posts and the job queue
//! that serializes rendering and printing.

mod dedup;
mod queue;

pub use dedup::SeenPosts;
pub use queue::JobQueue;
