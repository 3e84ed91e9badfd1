//! Request DTOs for reaction mutations
//!
//! All request DTOs implement `Deserialize` and `Validate`. Field names follow
//! the camelCase shape UI callers send.

use cheer_core::{ReactionKind, SubjectId, VoterId};
use serde::Deserialize;
use validator::Validate;

use crate::services::ServiceResult;

/// Add reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddReactionRequest {
    #[validate(length(min = 1, max = 128, message = "Subject id must be 1-128 characters"))]
    pub subject_id: String,

    #[validate(length(min = 1, max = 128, message = "Voter id must be 1-128 characters"))]
    pub voter_id: String,

    pub kind: ReactionKind,
}

/// Change reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReactionRequest {
    #[validate(length(min = 1, max = 128, message = "Subject id must be 1-128 characters"))]
    pub subject_id: String,

    #[validate(length(min = 1, max = 128, message = "Voter id must be 1-128 characters"))]
    pub voter_id: String,

    pub kind: ReactionKind,
}

/// Remove reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReactionRequest {
    #[validate(length(min = 1, max = 128, message = "Subject id must be 1-128 characters"))]
    pub subject_id: String,

    #[validate(length(min = 1, max = 128, message = "Voter id must be 1-128 characters"))]
    pub voter_id: String,
}

impl AddReactionRequest {
    pub fn new(subject_id: &SubjectId, voter_id: &VoterId, kind: ReactionKind) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            voter_id: voter_id.to_string(),
            kind,
        }
    }
}

impl ChangeReactionRequest {
    pub fn new(subject_id: &SubjectId, voter_id: &VoterId, kind: ReactionKind) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            voter_id: voter_id.to_string(),
            kind,
        }
    }
}

impl RemoveReactionRequest {
    pub fn new(subject_id: &SubjectId, voter_id: &VoterId) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            voter_id: voter_id.to_string(),
        }
    }
}

/// Validate the raw pair and convert it to typed ids
pub(crate) fn parse_pair(subject_id: &str, voter_id: &str) -> ServiceResult<(SubjectId, VoterId)> {
    Ok((SubjectId::parse(subject_id)?, VoterId::parse(voter_id)?))
}
