pub mod auth_controllers;
pub mod flow_controllers;
pub mod notification_controllers;
pub mod poll_controllers;
