//! # Demo Core
//!
//! Domain entities, engine service ports, and the services that prepare the
//! invoice demo environment: the sample data generator, the demo instance
//! starter and the invoice delegates.

pub mod domain;
pub mod ports;
pub mod services;
pub mod delegates;
pub mod invoice;
pub mod clock;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use clock::{Clock, ClockOverride, EngineClock, SystemClock};
pub use error::DomainError;
