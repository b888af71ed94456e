//! Deployment regions a bucket can be pinned to.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A region row. Read-only from the service's point of view.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct RegionInfo {
    pub id: Uuid,

    /// Lookup key (e.g. "us-west-2").
    pub code: String,

    /// Human readable label.
    pub name: String,
}
