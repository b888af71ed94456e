//! Referer whitelist attached to a bucket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// Persisted referer record. At most one exists per bucket.
#[derive(Clone, FromRow, Debug)]
pub struct RefererInfo {
    pub id: Uuid,
    pub bucket_id: Uuid,

    /// Whether requests without a `Referer` header are allowed.
    pub allow_empty: bool,

    /// Allowed origin patterns, stored as a JSON array.
    pub white_list: Json<Vec<String>>,

    pub updated_at: DateTime<Utc>,
}

/// Read view of a bucket's referer policy.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefererPolicy {
    pub id: Uuid,
    pub allow_empty: bool,
    pub white_list: Vec<String>,
}

impl From<RefererInfo> for RefererPolicy {
    fn from(info: RefererInfo) -> Self {
        Self {
            id: info.id,
            allow_empty: info.allow_empty,
            white_list: info.white_list.0,
        }
    }
}
