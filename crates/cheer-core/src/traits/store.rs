//! Reaction store trait (port) - defines the interface for reaction persistence
//!
//! The domain layer defines what it needs; the infrastructure layer provides
//! a local key-value backed implementation and an HTTP one.

use async_trait::async_trait;

use crate::entities::{NewReaction, Reaction};
use crate::error::DomainError;
use crate::value_objects::{ReactionKind, SubjectId, VoterId};

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Durable keyed storage of reaction records
///
/// Implementations own the `(subject_id, voter_id)` uniqueness constraint:
/// two racing inserts for the same pair yield one winner and one `Conflict`.
#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// All reactions for a subject, in no particular order
    async fn list(&self, subject_id: &SubjectId) -> RepoResult<Vec<Reaction>>;

    /// The reaction a voter cast on a subject, if any
    async fn find(&self, subject_id: &SubjectId, voter_id: &VoterId)
        -> RepoResult<Option<Reaction>>;

    /// Persist a new reaction; `Conflict` if the voter already reacted
    async fn insert(&self, reaction: NewReaction) -> RepoResult<Reaction>;

    /// Change the kind of an existing reaction; `NotFound` if there is none
    async fn replace(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        kind: ReactionKind,
    ) -> RepoResult<Reaction>;

    /// Delete a voter's reaction; `NotFound` if there is none
    async fn delete(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<()>;
}
