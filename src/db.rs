//! Connection setup, schema migration and the default region catalogue.

use crate::services::id_generator::IdGenerator;
use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;

const INIT_SQL: &str = include_str!("../migrations/0001_init.sql");

/// Regions seeded by `--migrate`, as (code, display name).
pub const DEFAULT_REGIONS: [(&str, &str); 12] = [
    ("local", "Local"),
    ("us-east-1", "US East (N. Virginia)"),
    ("us-east-2", "US East (Ohio)"),
    ("us-west-1", "US West (N. California)"),
    ("us-west-2", "US West (Oregon)"),
    ("eu-west-1", "Europe (Ireland)"),
    ("ap-south-1", "Asia Pacific (Mumbai)"),
    ("ap-southeast-1", "Asia Pacific (Singapore)"),
    ("ap-southeast-2", "Asia Pacific (Sydney)"),
    ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    ("ap-northeast-2", "Asia Pacific (Seoul)"),
    ("me-south-1", "Middle East (Bahrain)"),
];

/// Open a pool for `db_url`, creating the parent directory of a file-backed
/// database when it is missing.
pub async fn connect(db_url: &str) -> Result<SqlitePool> {
    let db_path = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .trim_start_matches("file:");
    tracing::debug!("Interpreted SQLite path => {}", db_path);

    let in_memory = db_path.starts_with(":memory:");
    if !in_memory {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                tracing::info!("Created missing directory {:?}", parent);
            }
        }
    }

    let mut options = SqlitePoolOptions::new();
    // Each in-memory connection is its own database.
    options = if in_memory {
        options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(5)
    };

    let url = if in_memory || db_url.contains("mode=") {
        db_url.to_string()
    } else {
        format!("{db_url}?mode=rwc")
    };
    Ok(options.connect(&url).await?)
}

/// Apply the embedded schema. Every statement is idempotent.
pub async fn run_migrations(db: &SqlitePool) -> Result<()> {
    let statements = INIT_SQL
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    tracing::info!("Running {} migration statements...", statements.len());

    for stmt in statements {
        tracing::debug!("Executing migration SQL: {}", stmt);
        sqlx::query(stmt).execute(db).await?;
    }

    Ok(())
}

/// Insert any of `DEFAULT_REGIONS` that are not present yet.
/// Returns the number of regions added.
pub async fn seed_regions(db: &SqlitePool, ids: &dyn IdGenerator) -> Result<u64> {
    let mut added = 0;
    for (code, name) in DEFAULT_REGIONS {
        let result = sqlx::query(
            "INSERT INTO regions (id, code, name) VALUES (?, ?, ?)
             ON CONFLICT(code) DO NOTHING",
        )
        .bind(ids.next_id())
        .bind(code)
        .bind(name)
        .execute(db)
        .await?;
        added += result.rows_affected();
    }
    tracing::info!(added, "Seeded default regions");
    Ok(added)
}
