use futures::future::{BoxFuture, FutureExt};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection, Database,
};

use super::{poll_not_found, ClosedPoll, PollFilter, PollStore};
use crate::db::schema::POLLS_COLLECTION;
use crate::models::poll_models::{validate_option_key, Poll};
use crate::utils::error::{AppError, AppResult};

pub struct MongoPollStore {
    polls: Collection<Poll>,
}

impl MongoPollStore {
    pub fn new(db: &Database) -> Self {
        Self {
            polls: db.collection::<Poll>(POLLS_COLLECTION),
        }
    }

    /// Explain why a conditional update matched nothing.
    async fn vote_failure(&self, id: ObjectId, option_key: &str) -> AppError {
        match self.polls.find_one(doc! { "_id": id }).await {
            Ok(None) => poll_not_found(),
            Ok(Some(mut poll)) => match poll.apply_vote(option_key) {
                Err(err) => err,
                Ok(()) => AppError::InternalError("Failed to increment vote for option".to_string()),
            },
            Err(err) => err.into(),
        }
    }
}

fn filter_document(filter: PollFilter) -> Document {
    match filter.active {
        // documents written before the flag existed count as active
        Some(true) => doc! { "isActive": { "$ne": false } },
        Some(false) => doc! { "isActive": false },
        None => doc! {},
    }
}

impl PollStore for MongoPollStore {
    fn insert(&self, mut poll: Poll) -> BoxFuture<'_, AppResult<Poll>> {
        async move {
            poll.id = None;
            let result = self.polls.insert_one(&poll).await?;
            let id = result.inserted_id.as_object_id().ok_or_else(|| {
                AppError::DatabaseError("Inserted poll has no ObjectId".to_string())
            })?;
            poll.id = Some(id);
            Ok(poll)
        }
        .boxed()
    }

    fn find(&self, id: ObjectId) -> BoxFuture<'_, AppResult<Option<Poll>>> {
        async move { Ok(self.polls.find_one(doc! { "_id": id }).await?) }.boxed()
    }

    fn list(&self, filter: PollFilter) -> BoxFuture<'_, AppResult<Vec<Poll>>> {
        async move {
            let cursor = self
                .polls
                .find(filter_document(filter))
                .sort(doc! { "createdAt": -1 })
                .await?;
            Ok(cursor.try_collect().await?)
        }
        .boxed()
    }

    fn cast_vote(&self, id: ObjectId, option_key: String) -> BoxFuture<'_, AppResult<Poll>> {
        async move {
            validate_option_key(&option_key).map_err(|_| {
                AppError::BadRequest(format!("Invalid option '{option_key}' for this poll"))
            })?;

            let option_path = format!("options.{option_key}");
            let filter = doc! {
                "_id": id,
                "isActive": { "$ne": false },
                option_path.as_str(): { "$exists": true },
            };
            let update = doc! { "$inc": { format!("{option_path}.votes"): 1 } };

            let updated = self
                .polls
                .find_one_and_update(filter, update)
                .return_document(ReturnDocument::After)
                .await?;

            match updated {
                Some(poll) => Ok(poll),
                None => Err(self.vote_failure(id, &option_key).await),
            }
        }
        .boxed()
    }

    fn close(&self, id: ObjectId) -> BoxFuture<'_, AppResult<ClosedPoll>> {
        async move {
            let mut poll = self
                .polls
                .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "isActive": false } })
                .return_document(ReturnDocument::Before)
                .await?
                .ok_or_else(poll_not_found)?;

            let changed = poll.is_active;
            poll.is_active = false;
            Ok(ClosedPoll { poll, changed })
        }
        .boxed()
    }

    fn delete(&self, id: ObjectId) -> BoxFuture<'_, AppResult<bool>> {
        async move {
            let result = self.polls.delete_one(doc! { "_id": id }).await?;
            Ok(result.deleted_count > 0)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_filter_treats_missing_flag_as_active() {
        assert_eq!(
            filter_document(PollFilter { active: Some(true) }),
            doc! { "isActive": { "$ne": false } }
        );
        assert_eq!(
            filter_document(PollFilter { active: Some(false) }),
            doc! { "isActive": false }
        );
        assert!(filter_document(PollFilter::default()).is_empty());
    }
}
