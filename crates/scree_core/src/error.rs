//! # ECS Error Types
//!
//! Registry misuse is surfaced to the caller as a hard error; it indicates
//! a logic bug, not an expected runtime condition.

use thiserror::Error;

use crate::entity::Entity;

/// Errors that can occur in the ECS registry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// Lookup of a destroyed or never-created entity id.
    #[error("unknown entity: {0}")]
    UnknownEntity(Entity),
}

/// Result type for registry operations.
pub type EcsResult<T> = Result<T, EcsError>;
