pub mod auth_provider;
pub mod firebase_admin;
pub mod firebase_compat;
pub mod push;
