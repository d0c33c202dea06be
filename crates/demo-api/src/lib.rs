//! # Demo API
//!
//! HTTP surface of the invoice demo: health and task-list filters.

pub mod handlers;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
