use std::ops::Deref;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
};

use crate::domain::repositories::bookmark::BookmarkRepositoryError;

#[derive(Clone)]
pub struct Pool(SqlitePool);

impl From<SqlitePool> for Pool {
    fn from(pool: SqlitePool) -> Self {
        Self(pool)
    }
}

impl Deref for Pool {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Open the bookmark database, creating the file when `create` is set, and
/// bring its schema up to date. Safe to call repeatedly on the same path:
/// migrations that already ran are skipped.
pub async fn establish_connection(
    database_path: &str,
    create: bool,
) -> Result<Pool, BookmarkRepositoryError> {
    let opts = SqliteConnectOptions::new()
        .create_if_missing(create)
        .filename(database_path)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .idle_timeout(std::time::Duration::from_secs(60))
        .max_lifetime(std::time::Duration::from_secs(3 * 60))
        .connect_with(opts)
        .await
        .map_err(|e| {
            error!("failed to open database {database_path}: {e}");
            BookmarkRepositoryError::OpenError(e)
        })?;

    match sqlx::migrate!("./migrations").run(&pool).await {
        Err(MigrateError::VersionMismatch(version)) => {
            warn!("migration {version} was previously applied but has been modified")
        }
        Err(e) => {
            error!("failed to migrate database {database_path}: {e}");
            return Err(e.into());
        }
        _ => {}
    }

    debug!("database ready at {database_path}");

    Ok(Pool(pool))
}
