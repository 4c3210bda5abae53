//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::mesh::MESH_CODE_LEN;

/// Domain errors represent invalid input to the pure core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid mesh code length: {length} (expected {MESH_CODE_LEN} characters)")]
    InvalidMeshCodeLength { length: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
