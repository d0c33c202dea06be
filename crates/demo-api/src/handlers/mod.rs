//! HTTP handlers

pub mod filters;
pub mod health;
