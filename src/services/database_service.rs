use log::{error, info};
use migration::Migrator;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::{error::Error, fs, time::Instant};

/// File behind a `sqlite://` url, `None` for in-memory or non-SQLite databases.
pub fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Applies pending migrations; an existing SQLite file is backed up first.
pub async fn prepare_database(
    db: &DatabaseConnection,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    info!("Checking migrations...");
    let start = Instant::now();

    db.ping().await.map_err(|e| {
        error!("Database ping failed: {}", e);
        e
    })?;

    let pending = Migrator::get_pending_migrations(db).await.map_err(|e| {
        error!("Failed to read pending migrations: {}", e);
        e
    })?;

    if pending.is_empty() {
        info!("Database schema is up to date.");
        return Ok(());
    }

    info!("{} pending migration(s):", pending.len());
    for m in &pending {
        info!("  - {}", m.name());
    }

    let applied = Migrator::get_applied_migrations(db).await?;
    if !applied.is_empty() {
        if let Some(path) = sqlite_file_path(database_url) {
            backup_database(&path).map_err(|e| {
                error!("Backup before migrating failed: {}", e);
                e
            })?;
        }
    }

    Migrator::up(db, None)
        .await
        .map(|_| info!("Migrations applied in {:?}", start.elapsed()))
        .map_err(|e| {
            error!("Failed to apply migrations: {}", e);
            e
        })?;

    Ok(())
}

/// Copies the database file next to itself as `<stem>_backup_<timestamp>.db`.
pub fn backup_database(db_path: &Path) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if !db_path.exists() {
        info!("Database file not found at {:?}", db_path);
        return Ok(None);
    }

    let stem = db_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "database".to_string());
    let backup_name = format!(
        "{}_backup_{}.db",
        stem,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let backup_path = db_path.with_file_name(backup_name);

    fs::copy(db_path, &backup_path)?;
    info!("Backup created: {}", backup_path.display());

    Ok(Some(backup_path))
}
