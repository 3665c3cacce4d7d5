//! Poll backend: poll documents on MongoDB (or in memory), pluggable auth and
//! push providers, Firebase admin handles, and a registry of runnable flows.
//!
//! # Configuration
//!
//! Everything is read from the environment (a local `.env` is loaded first).
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `SERVER_ADDR` | `0.0.0.0:8000` | listen address |
//! | `CORS_ORIGIN` | unset | allowed browser origin |
//! | `POLL_STORE` | `mongo` | `mongo` or `memory` |
//! | `MONGO_URI`, `DB_NAME` | | required for `mongo` |
//! | `AUTH_PROVIDER` | `mock` | `mock` or `session` |
//! | `SESSION_SECRET` | | required for `session` |
//! | `PUSH_PROVIDER` | `noop` | `fcm` or `noop` |
//! | `FIREBASE_SERVICE_ACCOUNT_KEY` | unset | service-account JSON |
//! | `NEXT_PUBLIC_FIREBASE_DATABASE_URL` | project default | Realtime Database URL |
//! | `RUST_LOG` | `info` | log filter |

pub mod config;
pub mod controllers;
pub mod db;
pub mod flows;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
