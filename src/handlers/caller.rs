//! Resolves the request's caller from the `x-user-id` header.
//!
//! Authentication happens upstream; this only turns the forwarded identity
//! into an explicit `Caller` value.

use crate::{errors::AppError, models::caller::Caller};
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized("missing caller identity"))?;
        let id = raw
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| AppError::unauthorized("malformed caller identity"))?;
        Ok(Caller::new(id))
    }
}
