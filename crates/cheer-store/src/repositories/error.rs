//! Error handling utilities for stores

use cheer_core::error::DomainError;
use cheer_core::value_objects::{SubjectId, VoterId};
use reqwest::StatusCode;

/// Convert a reqwest transport error to DomainError
pub fn map_http_error(e: reqwest::Error) -> DomainError {
    if e.is_decode() {
        DomainError::CorruptData(e.to_string())
    } else if e.is_builder() {
        DomainError::Internal(e.to_string())
    } else {
        // Timeouts, refused connections, resets: all worth retrying later
        DomainError::Transient(e.to_string())
    }
}

/// Map a non-success response status for a `(subject, voter)` operation
pub fn map_status(status: StatusCode, subject_id: &SubjectId, voter_id: &VoterId) -> DomainError {
    match status {
        StatusCode::CONFLICT => DomainError::conflict(subject_id, voter_id),
        StatusCode::NOT_FOUND => DomainError::not_found(subject_id, voter_id),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            DomainError::Validation(format!("reactions API rejected request ({status})"))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            DomainError::transient(format!("reactions API returned {status}"))
        }
        s if s.is_server_error() => DomainError::transient(format!("reactions API returned {s}")),
        s => DomainError::Internal(format!("unexpected reactions API status {s}")),
    }
}
