use std::sync::Arc;

use auth::TokenIssuer;
use customer_service::config::Config;
use customer_service::customer::service::CustomerService;
use customer_service::identity::service::IdentityService;
use customer_service::inbound::http::router::cors_layer;
use customer_service::inbound::http::router::create_router;
use customer_service::repositories::PostgresCustomerRepository;
use customer_service::repositories::PostgresIdentityRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "customer_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "customer-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_lifetime_hours = config.jwt.expiration_hours,
        cors_origin = ?config.cors.allowed_origin,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_lifetime(),
    ));
    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let customer_repository = Arc::new(PostgresCustomerRepository::new(pg_pool));

    let identity_service = Arc::new(IdentityService::new(identity_repository, token_issuer));
    let customer_service = Arc::new(CustomerService::new(customer_repository));

    let cors = cors_layer(config.cors.allowed_origin.as_deref())?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, customer_service, cors);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
