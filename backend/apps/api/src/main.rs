//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coach_api::{ApiConfig, build_app};
use coaching::{CoachingAppState, MemoryCoachingRepository, SqliteCoachingRepository};
use magic_auth::domain::MagicLinkMailer;
use magic_auth::{AuthService, ConsoleMailer, MemoryAuthRepository, ResendMailer, SqliteAuthRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "coach_api=info,magic_auth=info,coaching=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(environment = config.environment.as_str(), "Configuration loaded");

    let mailer = build_mailer(&config)?;

    // Storage backend
    let app = match config.database_url.as_deref() {
        None => {
            tracing::info!("Using in-memory store");
            let auth = AuthService::new(MemoryAuthRepository::new(), config.auth_config())
                .with_mailer(mailer);
            build_app(
                auth,
                CoachingAppState::new(MemoryCoachingRepository::new()),
                &config.web_origins,
            )
        }
        Some(url) => {
            let pool = connect_sqlite(url).await?;
            tracing::info!("Connected to database");

            let auth_repo = SqliteAuthRepository::new(pool.clone());
            auth_repo.migrate().await.context("auth schema migration failed")?;
            let coaching_repo = SqliteCoachingRepository::new(pool);
            coaching_repo
                .migrate()
                .await
                .context("coaching schema migration failed")?;

            tracing::info!("Migrations completed");

            let auth = AuthService::new(auth_repo, config.auth_config()).with_mailer(mailer);
            build_app(auth, CoachingAppState::new(coaching_repo), &config.web_origins)
        }
    };

    serve(app, &config.addr).await
}

fn build_mailer(config: &ApiConfig) -> anyhow::Result<Arc<dyn MagicLinkMailer>> {
    match &config.resend {
        Some(resend) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .context("failed to build HTTP client")?;
            tracing::info!("Using Resend email provider");
            Ok(Arc::new(
                ResendMailer::new(client, resend.api_key.clone(), resend.from.clone())
                    .with_link_ttl(config.token_ttl),
            ))
        }
        None => {
            tracing::info!("Using console email delivery");
            Ok(Arc::new(ConsoleMailer))
        }
    }
}

/// Accepts `sqlite:` URLs or a bare file path; the file is created if missing.
async fn connect_sqlite(url: &str) -> anyhow::Result<sqlx::SqlitePool> {
    let base = if url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(url)?
    } else {
        SqliteConnectOptions::new().filename(url)
    };
    let options = base
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open SQLite database at {url}"))
}

async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid API_ADDR: {addr}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
