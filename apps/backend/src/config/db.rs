use std::env;

use crate::error::AppError;

/// Which database a process talks to.
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Postgres, database named by `PROD_DB`
    Prod,
    /// Postgres, database named by `TEST_DB` (must end in `_test`)
    Test,
    /// Private in-memory SQLite, one connection
    InMemory,
    SqliteFile { file: String },
}

/// Builds the connection URL for a profile from environment variables
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { file } => Ok(format!("sqlite://{file}?mode=rwc")),
        DbProfile::Prod | DbProfile::Test => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(profile)?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

fn db_name(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        _ => must_var("PROD_DB"),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
