use std::net::SocketAddr;
use tracing::{error, info};

use demo_api::{router, AppState};
use demo_security::PasswordCost;
use demo_shared::config::AppConfig;

mod startup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    let _telemetry = demo_shared::telemetry::init_telemetry();

    info!("Invoice demo starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Engine with the invoice delegates registered
    let engine = startup::build_engine(&config, PasswordCost::Standard)?;
    let services = engine.services();

    let definitions = startup::deploy(&services).await?;
    info!("Deployed {} invoice process versions", definitions.len());

    startup::post_deploy(&services, &config).await?;

    let app = router(AppState {
        services,
        config: config.clone(),
    });

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
