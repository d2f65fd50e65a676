use std::sync::Arc;

use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::auth::models::TokenPolicy;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresCredentialRepository;
use auth_service::outbound::repositories::RedisRefreshStore;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_secs = config.jwt.access_ttl_secs,
        refresh_ttl_secs = config.jwt.refresh_ttl_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Credential store connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = ConnectionManager::new(redis_client).await?;
    tracing::info!(store = "redis", "Refresh store connection established");

    let codec = Arc::new(TokenCodec::new(config.jwt.secret.as_bytes()));
    let credential_repository = Arc::new(PostgresCredentialRepository::new(pg_pool));
    let refresh_store = Arc::new(RedisRefreshStore::new(
        redis_conn,
        config.redis.key_prefix.clone(),
    ));

    let auth_service = Arc::new(AuthService::new(
        credential_repository,
        refresh_store,
        Arc::clone(&codec),
        TokenPolicy::from_seconds(config.jwt.access_ttl_secs, config.jwt.refresh_ttl_secs),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, codec, config.jwt.refresh_ttl_secs);

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
