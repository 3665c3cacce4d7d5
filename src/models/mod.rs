pub mod content_models;
pub mod poll_models;
