//! # Demo Engine
//!
//! In-memory process engine implementing every service port of `demo-core`
//! (adapters). Good enough to deploy the invoice process, run its delegates
//! and host the seeded demo environment; nothing is persisted.

pub mod engine;
pub mod identity;
pub mod authorization;
pub mod filter;
pub mod task;
pub mod runtime;
pub mod repository;
pub mod metrics;

pub use engine::{InMemoryEngine, InMemoryEngineBuilder};
pub use metrics::{MetricsCounters, MetricsReport};
