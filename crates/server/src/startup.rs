use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, Backend};
use migration::MigratorTrait;
use service::person::repo::SeaOrmPersonRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let port = cfg.resolve_port()?;
    Ok(format!("{}:{}", cfg.server.host, port).parse()?)
}

/// Construct the person store selected by configuration.
/// The persistent backing is migrated before use.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    match cfg.backend() {
        Backend::Memory => {
            info!(backend = "memory", "using in-memory person store with demo contacts");
            Ok(AppState::demo())
        }
        Backend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "using database person store");
            Ok(AppState::new(Arc::new(SeaOrmPersonRepository::new(db))))
        }
    }
}

/// Public entry: build the app from a validated config and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.static_dir).await?;

    let addr = bind_addr(&cfg)?;
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server running");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_variant_binds_default_port() {
        let cfg = AppConfig::default();
        let addr = bind_addr(&cfg).unwrap();
        assert_eq!(addr.port(), configs::DEFAULT_MEMORY_PORT);
    }

    #[test]
    fn database_variant_needs_port() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "postgres://localhost/phonebook".into();
        assert!(bind_addr(&cfg).is_err());
    }

    #[tokio::test]
    async fn memory_state_is_seeded() {
        let state = build_state(&AppConfig::default()).await.unwrap();
        assert_eq!(state.persons.count().await.unwrap(), 4);
    }
}
