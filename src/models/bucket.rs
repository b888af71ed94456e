//! Represents a logical bucket — a named, owned container pinned to a region.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Access-control mode applied to every object in a bucket.
#[derive(Serialize, Deserialize, sqlx::Type, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum AclMode {
    #[default]
    Private,
    PublicRead,
    PublicReadWrite,
}

/// A storage bucket row.
///
/// Bucket names are unique across the whole system, not just per owner.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// Identifier assigned by the id generator before insert.
    pub id: Uuid,

    /// Globally unique bucket name (DNS naming rules).
    pub name: String,

    pub acl: AclMode,

    /// Region the bucket was created in.
    pub region_id: Uuid,

    /// Owning user.
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,
}

/// Listing view of a bucket joined with its region.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub id: Uuid,
    pub name: String,
    pub acl: AclMode,
    pub region_code: String,
    pub region_name: String,
    pub created_at: DateTime<Utc>,
}
