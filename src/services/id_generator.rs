//! Identity assignment for newly persisted entities.

use uuid::Uuid;

/// Produces identifiers that never collide with one issued before.
pub trait IdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> Uuid;
}

/// Random version-4 UUIDs (122 random bits).
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
