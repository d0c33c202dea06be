//! Engine service traits (ports)
//!
//! The demo code reaches the process engine only through these traits, so any
//! engine adapter can host it.

pub mod identity_service;
pub mod authorization_service;
pub mod filter_service;
pub mod task_service;
pub mod runtime_service;
pub mod repository_service;
pub mod metrics_reporter;

pub use identity_service::IdentityService;
pub use authorization_service::AuthorizationService;
pub use filter_service::FilterService;
pub use task_service::TaskService;
pub use runtime_service::RuntimeService;
pub use repository_service::RepositoryService;
pub use metrics_reporter::MetricsReporter;

#[cfg(test)]
pub use identity_service::MockIdentityService;
#[cfg(test)]
pub use authorization_service::MockAuthorizationService;
#[cfg(test)]
pub use filter_service::MockFilterService;
#[cfg(test)]
pub use task_service::MockTaskService;
#[cfg(test)]
pub use runtime_service::MockRuntimeService;
#[cfg(test)]
pub use repository_service::MockRepositoryService;
#[cfg(test)]
pub use metrics_reporter::MockMetricsReporter;
