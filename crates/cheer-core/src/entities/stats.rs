//! Reaction stats - the derived per-subject aggregate

use serde::{Deserialize, Serialize};

use super::reaction::Reaction;
use crate::value_objects::{ReactionKind, SubjectId};

/// Count per reaction kind; every kind is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub like: u64,
    pub love: u64,
    pub celebrate: u64,
    pub clap: u64,
    pub fire: u64,
}

impl KindCounts {
    /// Count for one kind
    pub fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Celebrate => self.celebrate,
            ReactionKind::Clap => self.clap,
            ReactionKind::Fire => self.fire,
        }
    }

    fn slot_mut(&mut self, kind: ReactionKind) -> &mut u64 {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Celebrate => &mut self.celebrate,
            ReactionKind::Clap => &mut self.clap,
            ReactionKind::Fire => &mut self.fire,
        }
    }

    /// Add one vote for `kind`
    pub fn increment(&mut self, kind: ReactionKind) {
        *self.slot_mut(kind) += 1;
    }

    /// Sum over all kinds
    pub fn total(&self) -> u64 {
        ReactionKind::ALL.iter().map(|&kind| self.get(kind)).sum()
    }

    /// `(kind, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u64)> + '_ {
        ReactionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Aggregated view of one subject's reactions for one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionStats {
    pub subject_id: SubjectId,
    pub counts_by_kind: KindCounts,
    pub total_count: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub viewer_reaction: Option<ReactionKind>,
}

impl ReactionStats {
    /// Stats for a subject nobody has reacted to
    pub fn empty(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            counts_by_kind: KindCounts::default(),
            total_count: 0,
            viewer_reaction: None,
        }
    }

    /// Fold a subject's reactions into counts
    ///
    /// `reactions` must already be filtered to `subject_id`.
    pub fn from_reactions(
        subject_id: SubjectId,
        reactions: &[Reaction],
        viewer_reaction: Option<ReactionKind>,
    ) -> Self {
        let counts_by_kind = reactions.iter().fold(KindCounts::default(), |mut counts, r| {
            counts.increment(r.kind);
            counts
        });

        Self {
            subject_id,
            counts_by_kind,
            total_count: reactions.len() as u64,
            viewer_reaction,
        }
    }

    /// Kind shown on the collapsed card
    ///
    /// The viewer's own reaction, else the first kind with votes, else `like`.
    pub fn featured_kind(&self) -> ReactionKind {
        self.viewer_reaction
            .or_else(|| {
                self.counts_by_kind
                    .iter()
                    .find(|&(_, count)| count > 0)
                    .map(|(kind, _)| kind)
            })
            .unwrap_or(ReactionKind::Like)
    }

    /// Whether the viewer has reacted with `kind`
    #[inline]
    pub fn is_selected(&self, kind: ReactionKind) -> bool {
        self.viewer_reaction == Some(kind)
    }
}
