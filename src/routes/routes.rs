//! Defines routes for bucket management.
//!
//! ## Structure
//! - **Probes**
//!   - `GET  /healthz`, `GET /readyz`
//!
//! - **Catalogue**
//!   - `GET  /regions` — available regions
//!
//! - **Bucket endpoints** (caller taken from `x-user-id`)
//!   - `GET  /buckets` — list own buckets (`?name=` substring filter)
//!   - `POST /buckets` — create bucket
//!   - `GET  /buckets/{name}` — fetch own bucket
//!   - `GET  /buckets/{name}/availability` — is the name free
//!   - `GET  /buckets/{name}/referer` — referer policy
//!   - `PUT  /buckets/{name}/referer` — replace referer policy
//!   - `GET  /usage` — usage statistics across own buckets

use crate::{
    handlers::{
        bucket_handlers::{
            bucket_availability, create_bucket, get_bucket, get_referer, list_buckets,
            list_regions, update_referer, usage,
        },
        health_handlers::{healthz, readyz},
    },
    state::AppState,
};
use axum::{Router, routing::get};

/// Build the router. The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/regions", get(list_regions))
        .route("/buckets", get(list_buckets).post(create_bucket))
        .route("/buckets/{name}", get(get_bucket))
        .route("/buckets/{name}/availability", get(bucket_availability))
        .route(
            "/buckets/{name}/referer",
            get(get_referer).put(update_referer),
        )
        .route("/usage", get(usage))
}
