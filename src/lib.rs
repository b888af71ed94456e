//! Bucket management service: bucket directory, referer policies and usage
//! statistics over a SQLite metadata store.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

/// Router with state attached, ready to serve.
pub fn app(state: state::AppState) -> Router {
    routes::routes::routes().with_state(state)
}
