use demo_core::services::EngineServices;
use demo_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub services: EngineServices,
    pub config: AppConfig,
}
