/// Entity helper tests against a live PostgreSQL.
pub mod entity_tests;

use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when no database is configured for tests.
pub(crate) async fn test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        println!("Skipping database tests (no DATABASE_URL or SKIP_DB_TESTS is set)");
        return None;
    }
    use migration::MigratorTrait;
    let db = crate::db::connect().await.ok()?;
    migration::Migrator::up(&db, None).await.ok()?;
    Some(db)
}
