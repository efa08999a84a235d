use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;
use identity_service::config::Config;
use identity_service::domain::account::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresAccountRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    anyhow::ensure!(
        config.token.lifetime_minutes > 0,
        "token.lifetime_minutes must be positive"
    );
    anyhow::ensure!(
        config.token.secret.len() >= 32,
        "token.secret must be at least 32 bytes"
    );

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime_minutes = config.token.lifetime_minutes,
        allowed_origins = %config.allowed_origins,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let token_issuer = TokenIssuer::new(
        config.token.secret.as_bytes(),
        Duration::minutes(config.token.lifetime_minutes),
    );
    let service = Arc::new(AuthService::new(
        Arc::clone(&repository),
        PasswordHasher::new(),
        token_issuer,
    ));

    let address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(service, repository, &config.allowed_origins);
    axum::serve(listener, application).await?;

    Ok(())
}
