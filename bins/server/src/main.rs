//! Ledgerbank API server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerbank_api::{AppState, create_router};
use ledgerbank_db::connect_with;
use ledgerbank_shared::{AppConfig, EmailService, JwtConfig, JwtService, LogNotifier, Notifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerbank=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let notifier: Arc<dyn Notifier> = if config.email.enabled {
        info!(
            smtp_host = %config.email.smtp_host,
            smtp_port = config.email.smtp_port,
            "SMTP delivery enabled"
        );
        Arc::new(EmailService::new(config.email.clone()))
    } else {
        info!("SMTP delivery disabled, OTP mails will be logged");
        Arc::new(LogNotifier)
    };

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        notifier,
        banking: Arc::new(config.banking.clone()),
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
