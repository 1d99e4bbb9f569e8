use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// `DATABASE_URL` from the environment or a `.env` file.
pub fn database_url() -> Result<String, sqlx::Error> {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))
}

/// Get or open the connection pool.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let url = database_url()?;
        tracing::info!("opening database pool");
        PgPoolOptions::new().max_connections(5).connect(&url).await
    })
    .await
}
