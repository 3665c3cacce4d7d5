use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::{Poll, PollOption};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub title: String,
    pub options: BTreeMap<String, PollOption>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub total_votes: u64,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        let total_votes = poll.total_votes();
        Self {
            id: poll.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: poll.title,
            options: poll.options,
            is_active: poll.is_active,
            created_at: poll.created_at,
            total_votes,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsResponse {
    pub id: String,
    pub is_active: bool,
    pub total_votes: u64,
    pub leaders: Vec<String>,
    pub tally: BTreeMap<String, u32>,
}

impl From<&Poll> for PollResultsResponse {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id.map(|id| id.to_hex()).unwrap_or_default(),
            is_active: poll.is_active,
            total_votes: poll.total_votes(),
            leaders: poll.leaders(),
            tally: poll
                .options
                .iter()
                .map(|(key, option)| (key.clone(), option.votes))
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub option_key: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ListPollsQuery {
    pub active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeletePollResponse {
    pub deleted: bool,
}
