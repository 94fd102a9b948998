use std::sync::Arc;

use color_eyre::eyre::Result;
use credo::{
    AccountService, Email, ExposeSecret, MailScheme, PostgresUserStore, PostmarkEmailClient,
    RedisTokenStore, Secret, SessionScheme, adapters::config::Settings, get_postgres_pool,
    get_redis_client, init_tracing,
};
use reqwest::Client as HttpClient;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = get_postgres_pool(settings.postgres.url.expose_secret()).await?;
    sqlx::migrate!().run(&pg_pool).await?;

    // Setup Redis connection
    let redis_client = get_redis_client(&settings.redis.host_name)?;
    let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool);
    let token_store = RedisTokenStore::new(redis_conn);

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::from(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let mail = MailScheme::new(settings.application.public_origin.clone());
    let session = SessionScheme::new(
        settings.session.jwt_secret.clone(),
        settings.session.cookie_name.clone(),
        settings.session.time_to_live_seconds,
    );

    // Assemble and run the service
    let service = AccountService::new(user_store, token_store, email_client, mail, session);

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("Starting account service...");
    service.run(listener, settings.allowed_origins.clone()).await?;

    Ok(())
}
