//! Reaction entity - a single vote cast by one voter on one subject

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactionId, ReactionKind, SubjectId, VoterId};

/// Reaction entity
///
/// At most one exists per `(subject_id, voter_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub subject_id: SubjectId,
    pub voter_id: VoterId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction stamped at `now`
    pub fn new(draft: NewReaction, now: DateTime<Utc>) -> Self {
        Self {
            id: ReactionId::generate(now),
            subject_id: draft.subject_id,
            voter_id: draft.voter_id,
            kind: draft.kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this reaction belongs to the given pair
    #[inline]
    pub fn is_for(&self, subject_id: &SubjectId, voter_id: &VoterId) -> bool {
        &self.subject_id == subject_id && &self.voter_id == voter_id
    }

    /// Change the kind in place; id and creation time are preserved
    pub fn rekind(&mut self, kind: ReactionKind, now: DateTime<Utc>) {
        self.kind = kind;
        self.updated_at = now;
    }
}

/// A reaction that has not been persisted yet
///
/// The store assigns the id and timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReaction {
    pub subject_id: SubjectId,
    pub voter_id: VoterId,
    pub kind: ReactionKind,
}

impl NewReaction {
    pub fn new(subject_id: SubjectId, voter_id: VoterId, kind: ReactionKind) -> Self {
        Self {
            subject_id,
            voter_id,
            kind,
        }
    }
}

/// The single service call a reaction click maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction {
    /// Voter has no reaction yet
    Add(ReactionKind),
    /// Voter switches to a different kind
    Change(ReactionKind),
    /// Voter clicked their current kind again
    Remove,
}

impl ReactionAction {
    /// Route a click on `clicked` given the voter's current reaction
    pub fn route(current: Option<ReactionKind>, clicked: ReactionKind) -> Self {
        match current {
            None => Self::Add(clicked),
            Some(kind) if kind == clicked => Self::Remove,
            Some(_) => Self::Change(clicked),
        }
    }

    /// The voter's reaction once the action has been applied
    pub fn resulting_kind(self) -> Option<ReactionKind> {
        match self {
            Self::Add(kind) | Self::Change(kind) => Some(kind),
            Self::Remove => None,
        }
    }
}
