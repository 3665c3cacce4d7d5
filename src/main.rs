use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use dotenvy::dotenv;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use poll_backend::config::{AuthKind, Config, StoreKind};
use poll_backend::services::auth_provider::{AuthProvider, MockAuthProvider, SessionAuthProvider};
use poll_backend::services::firebase_admin::FirebaseAdmin;
use poll_backend::services::push::select_push_provider;
use poll_backend::store::{InMemoryPollStore, MongoPollStore, PollStore};
use poll_backend::utils::error::{AppError, AppResult};
use poll_backend::{db, flows, routes, state};

#[tokio::main]
async fn main() {
    dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = Config::load()?;

    let polls = init_store(&config).await?;
    let auth = init_auth(&config)?;
    let firebase = FirebaseAdmin::shared(&config.firebase);
    let push = select_push_provider(config.push, &firebase);
    let flows = Arc::new(flows::bootstrap(polls.clone())?);

    let app_state = state::AppState::new(polls, auth, push, firebase, flows);

    let mut app = routes::app(app_state);
    if let Some(origin) = config.cors_origin.as_deref() {
        app = app.layer(cors_layer(origin)?);
        info!("CORS origin: {origin}");
    }

    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind to {}: {e}", config.server_addr)))?;

    info!("Server running at http://{}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {e}")))?;

    info!("Server shut down");
    Ok(())
}

async fn init_store(config: &Config) -> AppResult<Arc<dyn PollStore>> {
    match (config.store, config.mongo.as_ref()) {
        (StoreKind::Mongo, Some(settings)) => {
            let database = db::connection::init_db(settings).await?;
            db::schema::register_poll_schema(&database).await?;
            Ok(Arc::new(MongoPollStore::new(&database)))
        }
        (StoreKind::Mongo, None) => Err(AppError::ConfigError(
            "POLL_STORE=mongo needs MONGO_URI and DB_NAME".to_string(),
        )),
        (StoreKind::Memory, _) => {
            info!("Using in-memory poll store, polls are lost on restart");
            Ok(Arc::new(InMemoryPollStore::new()))
        }
    }
}

fn init_auth(config: &Config) -> AppResult<Arc<dyn AuthProvider>> {
    match config.auth {
        AuthKind::Mock => Ok(Arc::new(MockAuthProvider)),
        AuthKind::Session => {
            let secret = config.session_secret.clone().ok_or_else(|| {
                AppError::ConfigError("SESSION_SECRET must be set".to_string())
            })?;
            Ok(Arc::new(SessionAuthProvider::new(secret)))
        }
    }
}

fn cors_layer(origin: &str) -> AppResult<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|_| AppError::ConfigError(format!("Failed to parse CORS origin: {origin}")))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE])
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
