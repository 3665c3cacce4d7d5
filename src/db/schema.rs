use mongodb::{
    bson::{doc, Document},
    Database,
};
use tracing::info;

use crate::utils::error::AppResult;

pub const POLLS_COLLECTION: &str = "polls";

/// `$jsonSchema` validator for poll documents. Enforces shape only: an empty
/// `options` map is accepted.
pub fn poll_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["title", "options"],
            "properties": {
                "title": { "bsonType": "string", "minLength": 1 },
                "options": {
                    "bsonType": "object",
                    "additionalProperties": {
                        "bsonType": "object",
                        "required": ["name"],
                        "properties": {
                            "name": { "bsonType": "string" },
                            "votes": { "bsonType": ["int", "long"], "minimum": 0 }
                        }
                    }
                },
                "isActive": { "bsonType": "bool" },
                "createdAt": { "bsonType": "date" }
            }
        }
    }
}

/// Creates the `polls` collection with its validator. An existing collection
/// is left untouched.
pub async fn register_poll_schema(db: &Database) -> AppResult<()> {
    let existing = db.list_collection_names().await?;
    if existing.iter().any(|name| name == POLLS_COLLECTION) {
        info!("Collection '{POLLS_COLLECTION}' already registered, keeping its validator");
        return Ok(());
    }

    db.create_collection(POLLS_COLLECTION)
        .validator(poll_validator())
        .await?;

    info!("Registered '{POLLS_COLLECTION}' collection with schema validator");
    Ok(())
}
