pub mod logout;
pub mod me;
