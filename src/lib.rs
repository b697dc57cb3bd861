pub mod access;
pub mod app;
pub mod config;
pub mod docs;
pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;

// Re-export commonly used items for tests
pub use access::{AccessEvaluator, Permission, Requirement, Role};
pub use app::{create_app, router, AppState};
pub use config::AccessConfig;
