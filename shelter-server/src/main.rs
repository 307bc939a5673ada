use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shelter_server::config::ServerConfig;
use shelter_server::locator::ShelterLocator;
use shelter_server::maps::MapsClient;
use shelter_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shelter_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let maps = MapsClient::new(config.maps.clone())?;
    let locator = ShelterLocator::new(maps, config.search.clone())?;
    info!(
        start_deg = locator.config().start_radius_degrees,
        step_deg = locator.config().step_degrees,
        max_deg = locator.config().max_radius_degrees,
        max_attempts = locator.config().max_attempts(),
        "search configured"
    );

    let state = AppState::new(locator, config.default_center);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Shelter locator listening on http://{}", config.bind_addr);
    info!("  GET  /health                  - Health check");
    info!("  GET  /api/shelters/locate     - Nearest shelter and route");
    info!("  GET  /api/shelters/navigate   - Walking route between two points");

    axum::serve(listener, app).await?;
    Ok(())
}
