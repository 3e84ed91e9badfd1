//! Reaction service
//!
//! Use-case level operations over the reaction store: stats, add, change,
//! remove. The service holds no state and adds no locking; the one reaction
//! per voter rule is enforced by the store.

use std::collections::{HashMap, HashSet};

use cheer_core::entities::{NewReaction, Reaction, ReactionAction, ReactionStats};
use cheer_core::value_objects::{SubjectId, VoterId};
use futures::future::try_join_all;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::requests::parse_pair;
use crate::dto::{AddReactionRequest, ChangeReactionRequest, RemoveReactionRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregate a subject's reactions as seen by `voter_id`
    ///
    /// Counts and the viewer's reaction come from the same listing, so they
    /// always agree with each other.
    #[instrument(skip(self))]
    pub async fn get_stats(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
    ) -> ServiceResult<ReactionStats> {
        let reactions = self.ctx.store().list(subject_id).await?;
        let viewer_reaction = reactions
            .iter()
            .find(|r| &r.voter_id == voter_id)
            .map(|r| r.kind);

        Ok(ReactionStats::from_reactions(
            subject_id.clone(),
            &reactions,
            viewer_reaction,
        ))
    }

    /// Stats for several subjects at once
    ///
    /// Subjects are fetched concurrently; repeated ids are fetched once. The
    /// first failure fails the whole call.
    #[instrument(skip(self))]
    pub async fn get_bulk_stats(
        &self,
        subject_ids: &[SubjectId],
        voter_id: &VoterId,
    ) -> ServiceResult<HashMap<SubjectId, ReactionStats>> {
        let unique: HashSet<&SubjectId> = subject_ids.iter().collect();
        let all = try_join_all(
            unique
                .into_iter()
                .map(|subject_id| self.get_stats(subject_id, voter_id)),
        )
        .await?;

        Ok(all
            .into_iter()
            .map(|stats| (stats.subject_id.clone(), stats))
            .collect())
    }

    /// All reactions on a subject
    #[instrument(skip(self))]
    pub async fn list_reactions(&self, subject_id: &SubjectId) -> ServiceResult<Vec<Reaction>> {
        Ok(self.ctx.store().list(subject_id).await?)
    }

    /// Record a first reaction for the voter
    ///
    /// Fails with a conflict if the voter already reacted; callers route
    /// such clicks to `change_reaction` instead.
    #[instrument(skip(self))]
    pub async fn add_reaction(&self, request: AddReactionRequest) -> ServiceResult<Reaction> {
        request.validate()?;
        let (subject_id, voter_id) = parse_pair(&request.subject_id, &request.voter_id)?;

        let reaction = self
            .ctx
            .store()
            .insert(NewReaction::new(subject_id, voter_id, request.kind))
            .await?;

        info!(
            subject_id = %reaction.subject_id,
            voter_id = %reaction.voter_id,
            kind = %reaction.kind,
            "Reaction added"
        );

        Ok(reaction)
    }

    /// Switch the voter's existing reaction to another kind
    #[instrument(skip(self))]
    pub async fn change_reaction(&self, request: ChangeReactionRequest) -> ServiceResult<Reaction> {
        request.validate()?;
        let (subject_id, voter_id) = parse_pair(&request.subject_id, &request.voter_id)?;

        let reaction = self
            .ctx
            .store()
            .replace(&subject_id, &voter_id, request.kind)
            .await?;

        info!(
            subject_id = %subject_id,
            voter_id = %voter_id,
            kind = %reaction.kind,
            "Reaction changed"
        );

        Ok(reaction)
    }

    /// Withdraw the voter's reaction
    #[instrument(skip(self))]
    pub async fn remove_reaction(&self, request: RemoveReactionRequest) -> ServiceResult<()> {
        request.validate()?;
        let (subject_id, voter_id) = parse_pair(&request.subject_id, &request.voter_id)?;

        self.ctx.store().delete(&subject_id, &voter_id).await?;

        info!(subject_id = %subject_id, voter_id = %voter_id, "Reaction removed");

        Ok(())
    }

    /// Perform the single call a routed click maps to
    pub async fn apply(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        action: ReactionAction,
    ) -> ServiceResult<()> {
        match action {
            ReactionAction::Add(kind) => {
                self.add_reaction(AddReactionRequest::new(subject_id, voter_id, kind))
                    .await?;
            }
            ReactionAction::Change(kind) => {
                self.change_reaction(ChangeReactionRequest::new(subject_id, voter_id, kind))
                    .await?;
            }
            ReactionAction::Remove => {
                self.remove_reaction(RemoveReactionRequest::new(subject_id, voter_id))
                    .await?;
            }
        }
        Ok(())
    }
}
