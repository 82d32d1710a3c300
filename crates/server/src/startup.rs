use std::net::SocketAddr;

use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use service::repositories::Repositories;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `.env`, start logging and read the validated configuration.
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// Connect, migrate, build the router and serve until the process stops.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;

    if cfg.database.run_migrations {
        Migrator::up(&db, None).await.map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("migrations applied");
    } else {
        warn!("database.run_migrations is off, assuming the schema is current");
    }

    let state = ServerState::new(Repositories::seaorm(db), &cfg.auth);
    if state.require_token {
        info!("bearer token required on business routes");
    }
    let app = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server bind address: {e}")))?;
    info!(%addr, "starting bizdesk server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "unable to listen for ctrl-c");
    }
}
