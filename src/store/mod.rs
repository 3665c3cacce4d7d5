//! Persistence for polls.
//!
//! Handlers only see [`PollStore`]; which backend sits behind it is picked
//! from configuration at startup.

mod memory;
mod mongo;

use futures::future::BoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::models::poll_models::Poll;
use crate::utils::error::{AppError, AppResult};

pub use memory::InMemoryPollStore;
pub use mongo::MongoPollStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct PollFilter {
    pub active: Option<bool>,
}

impl PollFilter {
    pub fn matches(&self, poll: &Poll) -> bool {
        self.active.map_or(true, |active| poll.is_active == active)
    }
}

/// Outcome of [`PollStore::close`].
#[derive(Debug, Clone)]
pub struct ClosedPoll {
    pub poll: Poll,
    /// `false` when the poll was already closed.
    pub changed: bool,
}

pub trait PollStore: Send + Sync {
    /// Persist a new poll and return it with its generated id.
    fn insert(&self, poll: Poll) -> BoxFuture<'_, AppResult<Poll>>;

    fn find(&self, id: ObjectId) -> BoxFuture<'_, AppResult<Option<Poll>>>;

    /// Newest first.
    fn list(&self, filter: PollFilter) -> BoxFuture<'_, AppResult<Vec<Poll>>>;

    /// Add one vote to `option_key`. Fails with `NotFound`, `Conflict` when the
    /// poll is closed, or `BadRequest` when the option does not exist.
    fn cast_vote(&self, id: ObjectId, option_key: String) -> BoxFuture<'_, AppResult<Poll>>;

    /// Mark the poll inactive. Closing twice is not an error; the second call
    /// reports `changed: false`.
    fn close(&self, id: ObjectId) -> BoxFuture<'_, AppResult<ClosedPoll>>;

    fn delete(&self, id: ObjectId) -> BoxFuture<'_, AppResult<bool>>;
}

pub(crate) fn poll_not_found() -> AppError {
    AppError::NotFound("Poll not found".to_string())
}

pub fn parse_poll_id(poll_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(poll_id).map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))
}
