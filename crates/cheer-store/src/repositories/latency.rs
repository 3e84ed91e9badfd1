//! Simulated network latency around another store

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use cheer_core::entities::{NewReaction, Reaction};
use cheer_core::traits::{ReactionStore, RepoResult};
use cheer_core::value_objects::{ReactionKind, SubjectId, VoterId};

/// Decorator that sleeps before delegating each call
///
/// Lets a local store behave like a remote one when exercising loading and
/// submitting states.
pub struct SimulatedLatency {
    inner: Arc<dyn ReactionStore>,
    delay: Duration,
}

impl SimulatedLatency {
    pub fn new(inner: Arc<dyn ReactionStore>, delay: Duration) -> Self {
        Self { inner, delay }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ReactionStore for SimulatedLatency {
    async fn list(&self, subject_id: &SubjectId) -> RepoResult<Vec<Reaction>> {
        self.pause().await;
        self.inner.list(subject_id).await
    }

    async fn find(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
    ) -> RepoResult<Option<Reaction>> {
        self.pause().await;
        self.inner.find(subject_id, voter_id).await
    }

    async fn insert(&self, reaction: NewReaction) -> RepoResult<Reaction> {
        self.pause().await;
        self.inner.insert(reaction).await
    }

    async fn replace(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        kind: ReactionKind,
    ) -> RepoResult<Reaction> {
        self.pause().await;
        self.inner.replace(subject_id, voter_id, kind).await
    }

    async fn delete(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<()> {
        self.pause().await;
        self.inner.delete(subject_id, voter_id).await
    }
}
