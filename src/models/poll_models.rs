use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// A poll as stored in the `polls` collection.
///
/// `isActive` and `createdAt` carry defaults on read as well as on create, so
/// documents written without them still load. `createdAt` is a BSON date in
/// the collection so `{ createdAt: -1 }` sorts by time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub options: BTreeMap<String, PollOption>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub name: String,
    #[serde(default)]
    pub votes: u32,
}

/// Creation payload. `title` and `options` are required; the rest fall back
/// to their defaults.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPoll {
    pub title: String,
    pub options: BTreeMap<String, PollOption>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Poll {
    pub fn from_draft(draft: NewPoll) -> AppResult<Self> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::ValidationError("Poll title is required".to_string()));
        }

        for key in draft.options.keys() {
            validate_option_key(key)?;
        }

        Ok(Self {
            id: None,
            title: title.to_string(),
            options: draft.options,
            is_active: draft.is_active.unwrap_or_else(default_active),
            created_at: draft.created_at.unwrap_or_else(Utc::now),
        })
    }

    pub fn total_votes(&self) -> u64 {
        self.options.values().map(|o| u64::from(o.votes)).sum()
    }

    /// Keys of the options holding the most votes. Empty until someone votes.
    pub fn leaders(&self) -> Vec<String> {
        let max = self.options.values().map(|o| o.votes).max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }
        self.options
            .iter()
            .filter(|(_, o)| o.votes == max)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Apply a vote in place, with the same rules the stores enforce.
    pub fn apply_vote(&mut self, option_key: &str) -> AppResult<()> {
        if !self.is_active {
            return Err(AppError::Conflict(
                "Poll is closed. Voting is not allowed".to_string(),
            ));
        }
        let option = self.options.get_mut(option_key).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid option '{option_key}' for this poll"))
        })?;
        option.votes = option.votes.saturating_add(1);
        Ok(())
    }
}

/// Option keys become document paths (`options.<key>.votes`), so they follow
/// the store's field name rules.
pub fn validate_option_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::ValidationError("Option keys cannot be empty".to_string()));
    }
    if key.contains('\0') {
        return Err(AppError::ValidationError(
            "Option keys cannot contain NUL characters".to_string(),
        ));
    }
    if key.contains('.') || key.starts_with('$') {
        return Err(AppError::ValidationError(format!(
            "Option key '{key}' cannot contain '.' or start with '$'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mongodb::bson::{self, Bson};
    use serde_json::json;

    use super::*;

    fn favorite_color() -> NewPoll {
        serde_json::from_value(json!({
            "title": "Favorite color?",
            "options": {
                "a": { "name": "Red", "votes": 0 },
                "b": { "name": "Blue", "votes": 0 }
            }
        }))
        .unwrap()
    }

    #[test]
    fn defaults_apply_when_not_supplied() {
        let before = Utc::now();
        let poll = Poll::from_draft(favorite_color()).unwrap();
        let after = Utc::now();

        assert!(poll.is_active);
        assert!(poll.created_at >= before && poll.created_at <= after);
        assert_eq!(poll.options["a"].votes, 0);
        assert!(poll.id.is_none());
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let created_at = Utc::now() - chrono::Duration::days(2);
        let mut draft = favorite_color();
        draft.is_active = Some(false);
        draft.created_at = Some(created_at);

        let poll = Poll::from_draft(draft).unwrap();
        assert!(!poll.is_active);
        assert_eq!(poll.created_at, created_at);
    }

    #[test]
    fn missing_title_or_options_fails_to_parse() {
        let no_title = serde_json::from_value::<NewPoll>(json!({ "options": {} }));
        let no_options = serde_json::from_value::<NewPoll>(json!({ "title": "Lunch?" }));
        assert!(no_title.is_err());
        assert!(no_options.is_err());
    }

    #[test]
    fn negative_votes_fail_to_parse() {
        let draft = serde_json::from_value::<NewPoll>(json!({
            "title": "Lunch?",
            "options": { "a": { "name": "Soup", "votes": -1 } }
        }));
        assert!(draft.is_err());
    }

    #[test]
    fn option_without_votes_starts_at_zero() {
        let draft: NewPoll = serde_json::from_value(json!({
            "title": "Lunch?",
            "options": { "a": { "name": "Soup" } }
        }))
        .unwrap();
        assert_eq!(draft.options["a"].votes, 0);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut draft = favorite_color();
        draft.title = "   ".to_string();
        assert!(matches!(
            Poll::from_draft(draft),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn dotted_option_keys_are_rejected() {
        let mut draft = favorite_color();
        draft.options.insert(
            "c.d".to_string(),
            PollOption { name: "Green".to_string(), votes: 0 },
        );
        assert!(Poll::from_draft(draft).is_err());
        assert!(validate_option_key("$set").is_err());
        assert!(validate_option_key("").is_err());
        assert!(validate_option_key("green").is_ok());
    }

    #[test]
    fn nul_in_option_key_is_a_validation_error() {
        let mut draft = favorite_color();
        draft.options.insert(
            "gr\0een".to_string(),
            PollOption { name: "Green".to_string(), votes: 0 },
        );
        assert!(matches!(
            Poll::from_draft(draft),
            Err(AppError::ValidationError(_))
        ));
        assert!(validate_option_key("\0").is_err());
    }

    #[test]
    fn stored_document_without_flags_gets_defaults() {
        let poll: Poll = serde_json::from_value(json!({
            "title": "Legacy",
            "options": { "x": { "name": "X", "votes": 3 } }
        }))
        .unwrap();
        assert!(poll.is_active);
        assert_eq!(poll.total_votes(), 3);
    }

    #[test]
    fn serializes_with_document_field_names() {
        let poll = Poll::from_draft(favorite_color()).unwrap();
        let document = bson::to_document(&poll).unwrap();

        assert!(document.get_bool("isActive").unwrap());
        assert!(document.contains_key("createdAt"));
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn created_at_is_stored_as_a_date() {
        let older = Utc.timestamp_millis_opt(1_700_000_000_100).unwrap();
        let newer = older + chrono::Duration::milliseconds(1);
        let mut draft = favorite_color();

        draft.created_at = Some(older);
        let older_doc = bson::to_document(&Poll::from_draft(draft.clone()).unwrap()).unwrap();
        draft.created_at = Some(newer);
        let newer_doc = bson::to_document(&Poll::from_draft(draft).unwrap()).unwrap();

        let (Some(Bson::DateTime(older_at)), Some(Bson::DateTime(newer_at))) =
            (older_doc.get("createdAt"), newer_doc.get("createdAt"))
        else {
            panic!("createdAt should serialize as a BSON date");
        };
        assert!(newer_at > older_at);
        assert_eq!(older_at.timestamp_millis(), 1_700_000_000_100);

        let read_back: Poll = bson::from_document(older_doc).unwrap();
        assert_eq!(read_back.created_at, older);
    }

    #[test]
    fn leaders_and_votes() {
        let mut poll = Poll::from_draft(favorite_color()).unwrap();
        assert!(poll.leaders().is_empty());

        poll.apply_vote("b").unwrap();
        assert_eq!(poll.leaders(), vec!["b".to_string()]);

        poll.apply_vote("a").unwrap();
        assert_eq!(poll.leaders(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(poll.total_votes(), 2);

        assert!(matches!(poll.apply_vote("zzz"), Err(AppError::BadRequest(_))));

        poll.is_active = false;
        assert!(matches!(poll.apply_vote("a"), Err(AppError::Conflict(_))));
    }
}
