//! SQLite-backed implementation of every repository trait.

use super::{
    BucketRepository, RefererRepository, RegionRepository, StoreError, StoreResult,
    UsageRepository,
};
use crate::models::{
    bucket::{BucketInfo, BucketSummary},
    object::ObjectRecord,
    referer::RefererInfo,
    region::RegionInfo,
    usage::BucketUsageRow,
};
use async_trait::async_trait;
use sqlx::{QueryBuilder, SqlitePool, sqlite::Sqlite};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Metadata store sharing one SQLite pool across all repositories.
#[derive(Clone)]
pub struct SqliteStore {
    pub db: Arc<SqlitePool>,
}

impl SqliteStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Record an object row so its size counts towards bucket usage.
    pub async fn insert_object(&self, object: &ObjectRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO objects (id, bucket_id, key, size, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(object.id)
        .bind(object.bucket_id)
        .bind(&object.key)
        .bind(object.size)
        .bind(object.created_at)
        .execute(&*self.db)
        .await
        .map_err(|err| map_unique_violation(err, "objects.bucket_id, objects.key"))?;
        Ok(())
    }
}

#[async_trait]
impl RegionRepository for SqliteStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<RegionInfo>> {
        let region = sqlx::query_as::<_, RegionInfo>(
            "SELECT id, code, name FROM regions WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&*self.db)
        .await?;
        Ok(region)
    }

    async fn list(&self) -> StoreResult<Vec<RegionInfo>> {
        let regions =
            sqlx::query_as::<_, RegionInfo>("SELECT id, code, name FROM regions ORDER BY code")
                .fetch_all(&*self.db)
                .await?;
        Ok(regions)
    }
}

#[async_trait]
impl BucketRepository for SqliteStore {
    async fn list_by_owner(
        &self,
        owner: Uuid,
        name_filter: Option<&str>,
    ) -> StoreResult<Vec<BucketSummary>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT b.id, b.name, b.acl, r.code AS region_code, r.name AS region_name, \
             b.created_at \
             FROM buckets b JOIN regions r ON r.id = b.region_id \
             WHERE b.user_id = ",
        );
        builder.push_bind(owner);

        if let Some(filter) = name_filter.filter(|f| !f.is_empty()) {
            builder.push(" AND instr(b.name, ");
            builder.push_bind(filter);
            builder.push(") > 0");
        }

        builder.push(" ORDER BY b.name ASC");

        let rows: Vec<BucketSummary> = builder.build_query_as().fetch_all(&*self.db).await?;
        Ok(rows)
    }

    async fn find_by_name_and_owner(
        &self,
        name: &str,
        owner: Uuid,
    ) -> StoreResult<Option<BucketInfo>> {
        let bucket = sqlx::query_as::<_, BucketInfo>(
            "SELECT id, name, acl, region_id, user_id, created_at
             FROM buckets WHERE name = ? AND user_id = ?",
        )
        .bind(name)
        .bind(owner)
        .fetch_optional(&*self.db)
        .await?;
        Ok(bucket)
    }

    async fn count_by_name(&self, name: &str) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM buckets WHERE name = ?")
            .bind(name)
            .fetch_one(&*self.db)
            .await?;
        Ok(count)
    }

    async fn count_by_name_and_owner(&self, name: &str, owner: Uuid) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM buckets WHERE name = ? AND user_id = ?",
        )
        .bind(name)
        .bind(owner)
        .fetch_one(&*self.db)
        .await?;
        Ok(count)
    }

    async fn insert(&self, bucket: &BucketInfo) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO buckets (id, name, acl, region_id, user_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(bucket.id)
        .bind(&bucket.name)
        .bind(bucket.acl)
        .bind(bucket.region_id)
        .bind(bucket.user_id)
        .bind(bucket.created_at)
        .execute(&*self.db)
        .await
        .map_err(|err| map_unique_violation(err, "buckets.name"))?;
        debug!(bucket = %bucket.name, id = %bucket.id, "inserted bucket row");
        Ok(())
    }
}

#[async_trait]
impl RefererRepository for SqliteStore {
    async fn find_by_bucket(&self, bucket_id: Uuid) -> StoreResult<Option<RefererInfo>> {
        let referer = sqlx::query_as::<_, RefererInfo>(
            "SELECT id, bucket_id, allow_empty, white_list, updated_at
             FROM referers WHERE bucket_id = ?",
        )
        .bind(bucket_id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(referer)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<RefererInfo>> {
        let referer = sqlx::query_as::<_, RefererInfo>(
            "SELECT id, bucket_id, allow_empty, white_list, updated_at
             FROM referers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(referer)
    }

    async fn upsert(&self, referer: &RefererInfo) -> StoreResult<()> {
        let updated = sqlx::query(
            "UPDATE referers
             SET allow_empty = ?, white_list = ?, updated_at = ?
             WHERE id = ? AND bucket_id = ?",
        )
        .bind(referer.allow_empty)
        .bind(&referer.white_list)
        .bind(referer.updated_at)
        .bind(referer.id)
        .bind(referer.bucket_id)
        .execute(&*self.db)
        .await?;

        if updated.rows_affected() > 0 {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO referers (id, bucket_id, allow_empty, white_list, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(bucket_id) DO UPDATE SET
                 id = excluded.id,
                 allow_empty = excluded.allow_empty,
                 white_list = excluded.white_list,
                 updated_at = excluded.updated_at",
        )
        .bind(referer.id)
        .bind(referer.bucket_id)
        .bind(referer.allow_empty)
        .bind(&referer.white_list)
        .bind(referer.updated_at)
        .execute(&*self.db)
        .await
        .map_err(|err| map_unique_violation(err, "referers.id"))?;
        Ok(())
    }
}

#[async_trait]
impl UsageRepository for SqliteStore {
    async fn bucket_usage(&self, owner: Uuid) -> StoreResult<Vec<BucketUsageRow>> {
        let rows = sqlx::query_as::<_, BucketUsageRow>(
            "SELECT b.id AS bucket_id,
                    b.name AS bucket_name,
                    COUNT(o.id) AS object_count,
                    SUM(o.size) AS used_capacity,
                    MAX(o.size) AS object_max_size,
                    MIN(o.size) AS object_min_size,
                    CAST(AVG(o.size) AS INTEGER) AS object_average_size
             FROM buckets b
             LEFT JOIN objects o ON o.bucket_id = b.id
             WHERE b.user_id = ?
             GROUP BY b.id, b.name
             ORDER BY b.name ASC",
        )
        .bind(owner)
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }
}

/// Translate a unique-constraint failure into `StoreError::Conflict`.
fn map_unique_violation(err: sqlx::Error, constraint: &str) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(constraint.to_string())
        }
        other => StoreError::Sqlx(other),
    }
}
