//! Regeneration Context - Errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegenerationError {
    #[error("Actor {actor_id} does not own this result")]
    Permission { actor_id: u64 },

    #[error("Regeneration already in progress: {0}")]
    AlreadyInProgress(Uuid),
}
