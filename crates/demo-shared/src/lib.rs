//! # Demo Shared
//!
//! Configuration, telemetry, constants and the application error shared by
//! the invoice demo crates.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
