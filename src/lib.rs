pub mod app;
pub mod authz;
pub mod docs;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod routes;
pub mod store;

// Re-export commonly used items for tests
pub use app::{create_app, AppState};
