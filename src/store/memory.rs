use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{poll_not_found, ClosedPoll, PollFilter, PollStore};
use crate::models::poll_models::Poll;
use crate::utils::error::AppResult;

/// Process-local store used in development and tests.
#[derive(Default)]
pub struct InMemoryPollStore {
    polls: RwLock<HashMap<ObjectId, Poll>>,
}

impl InMemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PollStore for InMemoryPollStore {
    fn insert(&self, mut poll: Poll) -> BoxFuture<'_, AppResult<Poll>> {
        async move {
            let id = ObjectId::new();
            poll.id = Some(id);
            self.polls.write().await.insert(id, poll.clone());
            Ok(poll)
        }
        .boxed()
    }

    fn find(&self, id: ObjectId) -> BoxFuture<'_, AppResult<Option<Poll>>> {
        async move { Ok(self.polls.read().await.get(&id).cloned()) }.boxed()
    }

    fn list(&self, filter: PollFilter) -> BoxFuture<'_, AppResult<Vec<Poll>>> {
        async move {
            let mut polls: Vec<Poll> = self
                .polls
                .read()
                .await
                .values()
                .filter(|poll| filter.matches(poll))
                .cloned()
                .collect();
            polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(polls)
        }
        .boxed()
    }

    fn cast_vote(&self, id: ObjectId, option_key: String) -> BoxFuture<'_, AppResult<Poll>> {
        async move {
            let mut polls = self.polls.write().await;
            let poll = polls.get_mut(&id).ok_or_else(poll_not_found)?;
            poll.apply_vote(&option_key)?;
            Ok(poll.clone())
        }
        .boxed()
    }

    fn close(&self, id: ObjectId) -> BoxFuture<'_, AppResult<ClosedPoll>> {
        async move {
            let mut polls = self.polls.write().await;
            let poll = polls.get_mut(&id).ok_or_else(poll_not_found)?;
            let changed = poll.is_active;
            poll.is_active = false;
            Ok(ClosedPoll { poll: poll.clone(), changed })
        }
        .boxed()
    }

    fn delete(&self, id: ObjectId) -> BoxFuture<'_, AppResult<bool>> {
        async move { Ok(self.polls.write().await.remove(&id).is_some()) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::models::poll_models::{NewPoll, PollOption};
    use crate::utils::error::AppError;

    fn favorite_color() -> Poll {
        let options = BTreeMap::from([
            ("a".to_string(), PollOption { name: "Red".to_string(), votes: 0 }),
            ("b".to_string(), PollOption { name: "Blue".to_string(), votes: 0 }),
        ]);
        Poll::from_draft(NewPoll {
            title: "Favorite color?".to_string(),
            options,
            is_active: None,
            created_at: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn persisted_poll_reads_back_with_defaults() {
        let store = InMemoryPollStore::new();
        let before = Utc::now();
        let created = store.insert(favorite_color()).await.unwrap();
        let id = created.id.unwrap();

        let loaded = store.find(id).await.unwrap().unwrap();
        assert!(loaded.is_active);
        assert_eq!(loaded.options["a"].votes, 0);
        assert!(loaded.created_at >= before && loaded.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn votes_close_and_delete() {
        let store = InMemoryPollStore::new();
        let id = store.insert(favorite_color()).await.unwrap().id.unwrap();

        let poll = store.cast_vote(id, "b".to_string()).await.unwrap();
        assert_eq!(poll.options["b"].votes, 1);

        let err = store.cast_vote(id, "nope".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let closed = store.close(id).await.unwrap();
        assert!(!closed.poll.is_active);
        assert!(closed.changed);

        let again = store.close(id).await.unwrap();
        assert!(!again.poll.is_active);
        assert!(!again.changed);

        let err = store.cast_vote(id, "a".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.find(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_poll_is_not_found() {
        let store = InMemoryPollStore::new();
        let err = store.close(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_filters_by_active_flag() {
        let store = InMemoryPollStore::new();
        let open = store.insert(favorite_color()).await.unwrap().id.unwrap();
        let closed = store.insert(favorite_color()).await.unwrap().id.unwrap();
        store.close(closed).await.unwrap();

        let all = store.list(PollFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let active = store.list(PollFilter { active: Some(true) }).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, Some(open));
    }

    #[tokio::test]
    async fn concurrent_votes_are_all_counted() {
        let store = Arc::new(InMemoryPollStore::new());
        let id = store.insert(favorite_color()).await.unwrap().id.unwrap();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.cast_vote(id, "a".to_string()).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let poll = store.find(id).await.unwrap().unwrap();
        assert_eq!(poll.options["a"].votes, 50);
    }
}
