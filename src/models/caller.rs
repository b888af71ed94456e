//! Identity of the authenticated user making a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Passed explicitly to every operation that acts on the caller's behalf.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
}

impl Caller {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}
