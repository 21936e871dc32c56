use std::future::Future;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};
use tracing::{info, warn};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

fn engine(profile: &DbProfile) -> &'static str {
    match profile {
        DbProfile::Prod | DbProfile::Test => "postgresql",
        DbProfile::InMemory | DbProfile::SqliteFile { .. } => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all attempts are used.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Open a pool for `profile`. Does not run migrations.
///
/// In-memory SQLite is pinned to a single connection: every new connection
/// would otherwise see its own empty database.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    match profile {
        DbProfile::InMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbProfile::SqliteFile { .. } => {
            opts.max_connections(4);
        }
        DbProfile::Prod | DbProfile::Test => {
            opts.max_connections(16)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    }

    let conn = retry_connection(
        || {
            let opts = opts.clone();
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        CONNECT_ATTEMPTS,
        CONNECT_INTERVAL_MS,
    )
    .await?;

    if conn.get_database_backend() == DbBackend::Sqlite {
        conn.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    }

    info!(engine = engine(profile), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date. Single entry point for
/// `main` and the state builder.
pub async fn bootstrap_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migration::migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
