/// Database migration runner
///
/// Thin wrapper over sqlx's migration system. Migration SQL lives in the
/// `migrations/` directory at the workspace root; each migration is a
/// single forward-only `.sql` file.
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
/// use tasknest_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::{info, warn};

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Number of migrations that have been applied
    pub applied_migrations: usize,

    /// Latest applied migration version (timestamp)
    pub latest_version: Option<i64>,
}

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails
/// to execute, or the connection is lost mid-run. Failed migrations are
/// rolled back where Postgres allows it.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Gets the current migration status
///
/// # Errors
///
/// Returns an error if the migrations table cannot be queried
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT version
        FROM _sqlx_migrations
        WHERE success = TRUE
        ORDER BY version
        "#,
    )
    .fetch_all(pool)
    .await?;

    let versions: Vec<i64> = rows.iter().map(|row| row.get("version")).collect();

    Ok(MigrationStatus {
        applied_migrations: versions.len(),
        latest_version: versions.last().copied(),
    })
}
