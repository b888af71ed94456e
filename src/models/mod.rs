//! Core data models for the bucket management service.
//!
//! Persisted entities map to database tables via `sqlx::FromRow`; read views
//! serialize as camelCase JSON via `serde`.

pub mod bucket;
pub mod caller;
pub mod object;
pub mod referer;
pub mod region;
pub mod usage;
