use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Permissive unless a single browser origin is configured.
pub fn build_cors(cfg: &ServerConfig) -> Result<CorsLayer, StartupError> {
    let Some(origin) = cfg.cors_origin.as_deref() else {
        return Ok(CorsLayer::very_permissive());
    };
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| StartupError::InvalidConfig(format!("server.cors_origin: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server bind address: {e}")))
}

/// Router over a ready database connection, with CORS from config.
pub fn app(state: AppState, cfg: &ServerConfig) -> Result<Router, StartupError> {
    Ok(routes::build_router(state, build_cors(cfg)?))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(err = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate and serve until Ctrl+C. Logging must already be set up.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        models::db::migrate(&db).await?;
        info!("migrations applied");
    }

    let app = app(AppState { db }, &cfg.server)?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting personnel record service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_invalid_origin() {
        let cfg = ServerConfig {
            cors_origin: Some("bad\norigin".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(build_cors(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn cors_accepts_configured_origin() {
        let cfg = ServerConfig {
            cors_origin: Some("http://localhost:5175".into()),
            ..ServerConfig::default()
        };
        assert!(build_cors(&cfg).is_ok());
    }

    #[test]
    fn bind_addr_from_host_and_port() {
        let cfg = ServerConfig { host: "0.0.0.0".into(), port: 6000, ..ServerConfig::default() };
        assert_eq!(bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:6000");
    }

    #[tokio::test]
    async fn run_fails_on_the_given_bind_address() {
        let cfg = AppConfig {
            server: ServerConfig { host: "not a host".into(), ..ServerConfig::default() },
            database: configs::DatabaseConfig::sqlite_memory(),
            ..AppConfig::default()
        };
        let err = run(cfg).await.unwrap_err();
        assert!(err.to_string().contains("server bind address"));
    }
}
