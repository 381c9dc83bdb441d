use anyhow::Result;
use climate_api::{api, config, database::Database, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    let db = Database::connect(&cfg.db).await?;
    let app = api::router(api::AppState::new(db.clone()), &cfg);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("server binding to 0.0.0.0 - the API will be reachable from the network");
    }

    info!(%addr, store = %cfg.db.url, "starting climate API");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    db.close().await;
    warn!("shutdown complete");
    Ok(())
}
