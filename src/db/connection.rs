use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::MongoSettings;
use crate::utils::error::{AppError, AppResult};

pub async fn init_db(settings: &MongoSettings) -> AppResult<Database> {
    let mut client_options = ClientOptions::parse(&settings.uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {e}")))?;

    client_options.app_name = Some("PollBackend".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {e}")))?;

    info!(db = %settings.db_name, "Database client ready");

    Ok(client.database(&settings.db_name))
}
