//! Usage statistics: per-bucket rows and the per-user rollup.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Derived statistics for one bucket. Empty buckets carry `None` for every
/// aggregate except the count.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketUsageRow {
    pub bucket_id: Uuid,
    pub bucket_name: String,
    pub object_count: Option<i64>,
    pub used_capacity: Option<i64>,
    pub object_max_size: Option<i64>,
    pub object_min_size: Option<i64>,
    pub object_average_size: Option<i64>,
}

/// Folded summary over all of a user's buckets.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub max_object_size: i64,
    pub min_object_size: i64,
    pub total_used_capacity: i64,
    pub total_object_count: i64,
    pub all_average: i64,
    pub bucket_count: i64,
    pub capacity: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BucketUsageReport {
    pub detail: Vec<BucketUsageRow>,
    pub total: UsageSummary,
}
