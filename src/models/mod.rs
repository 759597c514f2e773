pub mod activity;
pub mod permission;
pub mod role;
pub mod user;
