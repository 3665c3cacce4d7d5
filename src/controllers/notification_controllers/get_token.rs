use axum::Json;
use serde_json::{json, Value};

use crate::services::firebase_compat;

/// Old clients still ask for a messaging token; they always get an empty one.
pub async fn get_token() -> Json<Value> {
    Json(json!({ "token": firebase_compat::get_token().await }))
}
