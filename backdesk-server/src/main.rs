//! Binary entrypoint: configuration, database wiring, and the axum server
//! with graceful shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backdesk_core::{
    admin::UserAdminService,
    auth::{AuthService, CredentialHasher, TokenCodec, TokenSettings},
    catalog::CatalogService,
    store::postgres::{self, PostgresProductStore, PostgresUserStore},
};
use backdesk_server::{config::Config, routes::create_router, state::AppState};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Database connections kept in the pool.
const MAX_DB_CONNECTIONS: u32 = 10;

#[derive(Parser, Debug)]
#[command(name = "backdesk-server")]
#[command(about = "Administrative backend: JWT auth, account management, product catalog")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "HTTP_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "HTTP_HOST")]
    host: Option<String>,

    /// Environment file to load instead of ./.env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Environment files load before the tracing filter so RUST_LOG set there
    // takes effect.
    match cli.env_file.as_deref() {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("loading env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.http_port = port;
    }
    if let Some(host) = cli.host {
        config.http_host = host;
    }

    let pool = postgres::connect(&config.database_url, MAX_DB_CONNECTIONS).await?;

    backdesk_core::MIGRATOR
        .run(&pool)
        .await
        .context("running database migrations")?;
    info!("database migrations up to date");

    let users = Arc::new(PostgresUserStore::new(pool.clone()));
    let products = Arc::new(PostgresProductStore::new(pool));

    let hasher = Arc::new(CredentialHasher::new()?);
    let tokens = Arc::new(TokenCodec::new(TokenSettings {
        secret: config.jwt_secret.to_string(),
        issuer: config.jwt_issuer.clone(),
        lifetime: config.jwt_expiry,
    })?);

    let state = AppState::new(
        Arc::new(AuthService::new(users.clone(), hasher.clone(), tokens)),
        Arc::new(UserAdminService::new(users, hasher)),
        Arc::new(CatalogService::new(products)),
    );

    let app = create_router(state, &config.cors_allowed_origins);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, issuer = %config.jwt_issuer, "backdesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM, letting in-flight
/// requests finish before the server exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install interrupt handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
