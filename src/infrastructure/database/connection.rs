use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Debug)]
pub enum DatabaseError {
    ConnectionError(String),
    PoolError(String),
    QueryError(String),
    MigrationError(String),
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            DatabaseError::PoolError(msg) => write!(f, "Pool error: {}", msg),
            DatabaseError::QueryError(msg) => write!(f, "Query error: {}", msg),
            DatabaseError::MigrationError(msg) => write!(f, "Migration error: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {}

pub fn create_connection_pool(database_url: &str, max_size: u32) -> Result<DbPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    r2d2::Pool::builder()
        .max_size(max_size)
        .min_idle(Some(1))
        .build(manager)
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

pub fn get_connection_from_pool(pool: &DbPool) -> Result<DbConnection, DatabaseError> {
    pool.get().map_err(|e| DatabaseError::PoolError(e.to_string()))
}

pub fn run_migrations(pool: &DbPool) -> Result<(), DatabaseError> {
    let mut conn = get_connection_from_pool(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!(applied = applied.len(), "Database migrations up to date");
    Ok(())
}

/// Runs blocking diesel work on a pooled connection off the async runtime.
/// The connection goes back to the pool when the closure returns, whatever
/// the result.
pub async fn with_connection<F, T>(pool: &DbPool, work: F) -> Result<T, DatabaseError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || {
        let mut conn = get_connection_from_pool(&pool)?;
        work(&mut conn).map_err(|e| DatabaseError::QueryError(e.to_string()))
    })
    .await
    .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
}
