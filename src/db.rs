use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

// journal_mode is persisted in the database file, so setting it on one pooled
// connection covers the rest. Per-connection pragmas do not belong here.
const JOURNAL_MODE: &str = "PRAGMA journal_mode=WAL";

pub async fn connect_and_migrate(
    options: impl Into<ConnectOptions>,
) -> AppResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    db.execute(Statement::from_string(db.get_database_backend(), JOURNAL_MODE.to_string()))
        .await?;

    Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    connect_and_migrate(options).await.expect("in-memory database")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wal_applies_to_every_pooled_connection() {
        let path =
            std::env::temp_dir().join(format!("movie-catalog-wal-{}.db", std::process::id()));
        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options.max_connections(3).min_connections(3).sqlx_logging(false);
        let db = connect_and_migrate(options).await.unwrap();

        let mut modes = Vec::new();
        for _ in 0..3 {
            let row = db
                .query_one(Statement::from_string(
                    db.get_database_backend(),
                    "PRAGMA journal_mode".to_string(),
                ))
                .await
                .unwrap()
                .unwrap();
            modes.push(row.try_get::<String>("", "journal_mode").unwrap());
        }

        db.close().await.unwrap();
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
        assert!(modes.iter().all(|m| m == "wal"), "{modes:?}");
    }
}
