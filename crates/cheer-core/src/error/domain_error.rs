//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{IdParseError, SubjectId, VoterId};

/// Domain layer errors
///
/// Stores raise these; the service passes them through unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction already exists for voter {voter_id} on subject {subject_id}")]
    Conflict {
        subject_id: SubjectId,
        voter_id: VoterId,
    },

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No reaction from voter {voter_id} on subject {subject_id}")]
    NotFound {
        subject_id: SubjectId,
        voter_id: VoterId,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Transient failure: {0}")]
    Transient(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a conflict error for a voter/subject pair
    pub fn conflict(subject_id: &SubjectId, voter_id: &VoterId) -> Self {
        Self::Conflict {
            subject_id: subject_id.clone(),
            voter_id: voter_id.clone(),
        }
    }

    /// Create a not found error for a voter/subject pair
    pub fn not_found(subject_id: &SubjectId, voter_id: &VoterId) -> Self {
        Self::NotFound {
            subject_id: subject_id.clone(),
            voter_id: voter_id.clone(),
        }
    }

    /// Create a transient error
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient(msg.into())
    }

    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "REACTION_ALREADY_EXISTS",
            Self::NotFound { .. } => "UNKNOWN_REACTION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Transient(_) => "TRANSIENT_ERROR",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::CorruptData(_) => "CORRUPT_DATA",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the backing storage or network failed
    ///
    /// Callers keep their last-known state on these.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::StorageUnavailable(_))
    }

    /// Check if local state may have drifted from the store
    ///
    /// Conflict and not-found both mean the caller's view is stale.
    pub fn is_drift(&self) -> bool {
        self.is_conflict() || self.is_not_found()
    }
}

impl From<IdParseError> for DomainError {
    fn from(err: IdParseError) -> Self {
        Self::Validation(err.to_string())
    }
}
