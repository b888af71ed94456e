//! HTTP handlers for bucket, referer, region and usage operations.
//! Every bucket-scoped handler resolves ownership through
//! `require_owned_bucket` before touching the bucket's records.

use crate::{
    errors::AppError,
    models::{
        bucket::{AclMode, BucketInfo, BucketSummary},
        caller::Caller,
        referer::RefererPolicy,
        region::RegionInfo,
        usage::BucketUsageReport,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query params accepted by `GET /buckets`.
#[derive(Debug, Deserialize)]
pub struct ListBucketsQuery {
    pub name: Option<String>,
}

/// Body for `POST /buckets`.
#[derive(Debug, Deserialize)]
pub struct CreateBucketReq {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub acl: AclMode,
}

/// Body for `PUT /buckets/{name}/referer`. Every field is written.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRefererReq {
    pub id: Option<Uuid>,
    pub allow_empty: bool,
    #[serde(default)]
    pub white_list: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResp {
    pub name: String,
    pub available: bool,
}

/// GET `/regions`
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegionInfo>>, AppError> {
    Ok(Json(state.buckets.list_regions().await?))
}

/// GET `/buckets?name=` — caller's buckets, optionally filtered by name.
pub async fn list_buckets(
    State(state): State<AppState>,
    caller: Caller,
    Query(q): Query<ListBucketsQuery>,
) -> Result<Json<Vec<BucketSummary>>, AppError> {
    let buckets = state
        .buckets
        .list_bucket(caller.id, q.name.as_deref())
        .await?;
    Ok(Json(buckets))
}

/// POST `/buckets` — create bucket.
pub async fn create_bucket(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateBucketReq>,
) -> Result<impl IntoResponse, AppError> {
    let bucket = state
        .buckets
        .create(&caller, &req.name, &req.region, req.acl)
        .await?;
    Ok((StatusCode::CREATED, Json(bucket)))
}

/// GET `/buckets/{name}` — the caller's bucket or 404.
pub async fn get_bucket(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
) -> Result<Json<BucketInfo>, AppError> {
    Ok(Json(state.buckets.require_owned_bucket(&caller, &name).await?))
}

/// GET `/buckets/{name}/availability`
pub async fn bucket_availability(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AvailabilityResp>, AppError> {
    let available = state.buckets.bucket_name_available(&name).await?;
    Ok(Json(AvailabilityResp { name, available }))
}

/// GET `/buckets/{name}/referer` — `null` when no policy is configured.
pub async fn get_referer(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
) -> Result<Json<Option<RefererPolicy>>, AppError> {
    let bucket = state.buckets.require_owned_bucket(&caller, &name).await?;
    Ok(Json(state.buckets.get_referer(bucket.id).await?))
}

/// PUT `/buckets/{name}/referer` — replace the whole policy.
pub async fn update_referer(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
    Json(req): Json<UpdateRefererReq>,
) -> Result<StatusCode, AppError> {
    let bucket = state.buckets.require_owned_bucket(&caller, &name).await?;
    state
        .buckets
        .update_referer(bucket.id, req.id, req.allow_empty, req.white_list)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/usage` — per-bucket usage plus the rolled-up total.
pub async fn usage(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<BucketUsageReport>, AppError> {
    Ok(Json(state.buckets.usage_report(&caller).await?))
}
