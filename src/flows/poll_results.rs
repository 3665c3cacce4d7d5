use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use serde_json::{json, Value};

use super::Flow;
use crate::store::{parse_poll_id, poll_not_found, PollStore};
use crate::utils::error::{AppError, AppResult};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Input {
    poll_id: String,
}

/// Summarizes where a poll stands: totals and the current leaders.
pub struct PollResultsFlow {
    store: Arc<dyn PollStore>,
}

impl PollResultsFlow {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }
}

impl Flow for PollResultsFlow {
    fn name(&self) -> &'static str {
        "poll-results"
    }

    fn description(&self) -> &'static str {
        "Vote totals and current leaders for a poll"
    }

    fn run(&self, input: Value) -> BoxFuture<'_, AppResult<Value>> {
        async move {
            let input: Input = serde_json::from_value(input)
                .map_err(|e| AppError::BadRequest(format!("Invalid flow input: {e}")))?;
            let id = parse_poll_id(&input.poll_id)?;

            let poll = self.store.find(id).await?.ok_or_else(poll_not_found)?;

            Ok(json!({
                "id": id.to_hex(),
                "title": poll.title,
                "isActive": poll.is_active,
                "totalVotes": poll.total_votes(),
                "leaders": poll.leaders(),
            }))
        }
        .boxed()
    }
}
