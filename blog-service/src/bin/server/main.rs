use std::sync::Arc;

use auth::TokenIssuer;
use blog_service::config::Config;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::AuthService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::media::FsMediaStore;
use blog_service::outbound::preview::HttpPreviewFetcher;
use blog_service::outbound::repositories::PostgresLikeLedger;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        media_root = %config.media.root,
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

    let token_issuer = Arc::new(TokenIssuer::new(&config.jwt.token_config()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool.clone()));
    let like_ledger = Arc::new(PostgresLikeLedger::new(pg_pool));
    let media_store = Arc::new(FsMediaStore::new(&config.media.root));
    let preview_fetcher = Arc::new(HttpPreviewFetcher::new(Arc::clone(&media_store))?);

    let auth_service = Arc::new(AuthService::new(user_repository, token_issuer));
    let post_service = Arc::new(PostService::new(
        post_repository,
        like_ledger,
        preview_fetcher,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, post_service, media_store);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
