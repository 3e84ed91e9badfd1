//! Reaction view-model
//!
//! Per-subject state a UI binds to: the last fetched stats, a loading flag,
//! and an in-flight guard for clicks. Every successful mutation is followed
//! by a re-fetch; counts are never patched locally.
//!
//! Nothing here returns an error. Failures are logged, recorded in
//! `last_error`, and the previously displayed stats stay in place.

use std::sync::atomic::{AtomicBool, Ordering};

use cheer_core::{ReactionAction, ReactionKind, ReactionStats, SubjectId, VoterId};
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use crate::services::{ReactionService, ServiceContext, ServiceResult};

/// What happened to a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Another action was in flight, or stats were never loaded
    Ignored,
    /// The routed call succeeded and stats were re-fetched
    Applied(ReactionAction),
    /// The store still disagreed after re-routing, or the reaction was gone;
    /// stats were re-fetched
    Resynced,
    /// Storage or network failure; prior stats remain displayed
    Failed,
}

#[derive(Debug, Default)]
struct ViewState {
    stats: Option<ReactionStats>,
    loading: bool,
    last_error: Option<String>,
}

/// Clears the submitting flag when the click settles, however it settles
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// View-model for one subject as seen by one voter
pub struct ReactionViewModel {
    ctx: ServiceContext,
    subject_id: SubjectId,
    voter_id: VoterId,
    state: RwLock<ViewState>,
    submitting: AtomicBool,
}

impl ReactionViewModel {
    /// Create a view-model; it reports `loading` until the first `load` settles
    pub fn new(ctx: ServiceContext, subject_id: SubjectId, voter_id: VoterId) -> Self {
        Self {
            ctx,
            subject_id,
            voter_id,
            state: RwLock::new(ViewState {
                loading: true,
                ..ViewState::default()
            }),
            submitting: AtomicBool::new(false),
        }
    }

    /// Create a view-model for this installation's voter
    pub fn for_installation(ctx: ServiceContext, subject_id: SubjectId) -> ServiceResult<Self> {
        let voter_id = ctx.voter_id()?;
        Ok(Self::new(ctx, subject_id, voter_id))
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    /// Last successfully fetched stats
    pub fn stats(&self) -> Option<ReactionStats> {
        self.state.read().stats.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Whether a click is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Message of the most recent failure, cleared by the next successful fetch
    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    /// Kind for the collapsed card icon
    pub fn featured_kind(&self) -> ReactionKind {
        self.state
            .read()
            .stats
            .as_ref()
            .map_or(ReactionKind::Like, ReactionStats::featured_kind)
    }

    /// Fetch stats, keeping the previous ones if the fetch fails
    #[instrument(skip(self), fields(subject_id = %self.subject_id))]
    pub async fn load(&self) -> Option<ReactionStats> {
        self.state.write().loading = true;
        self.refresh().await;

        let mut state = self.state.write();
        state.loading = false;
        state.stats.clone()
    }

    /// Handle a click on `kind`
    ///
    /// Routes to exactly one of add, change or remove based on the displayed
    /// viewer reaction. A `Conflict` means the voter reacted elsewhere since
    /// the last fetch: stats are re-fetched and the click is routed once more
    /// against them. Clicks arriving while another is in flight are dropped,
    /// not queued.
    #[instrument(skip(self), fields(subject_id = %self.subject_id))]
    pub async fn click(&self, kind: ReactionKind) -> ClickOutcome {
        if self.submitting.swap(true, Ordering::SeqCst) {
            debug!("Click ignored while another is in flight");
            return ClickOutcome::Ignored;
        }
        let _guard = SubmitGuard(&self.submitting);

        let current = match self.state.read().stats.as_ref() {
            Some(stats) => stats.viewer_reaction,
            None => {
                debug!("Click ignored before stats were loaded");
                return ClickOutcome::Ignored;
            }
        };
        let action = ReactionAction::route(current, kind);

        let service = ReactionService::new(&self.ctx);
        match service.apply(&self.subject_id, &self.voter_id, action).await {
            Err(e) if e.is_conflict() => {
                debug!(error = %e, "Voter already reacted, re-routing against fresh stats");
                let Some(stats) = self.refresh().await else {
                    return ClickOutcome::Failed;
                };
                let rerouted = ReactionAction::route(stats.viewer_reaction, kind);
                let result = service.apply(&self.subject_id, &self.voter_id, rerouted).await;
                self.settle(rerouted, result).await
            }
            result => self.settle(action, result).await,
        }
    }

    /// Turn the result of an applied action into an outcome, without retrying
    async fn settle(&self, action: ReactionAction, result: ServiceResult<()>) -> ClickOutcome {
        match result {
            Ok(()) => {
                self.refresh().await;
                ClickOutcome::Applied(action)
            }
            Err(e) if e.is_drift() => {
                debug!(error = %e, "Displayed reaction was stale, re-fetching");
                self.refresh().await;
                ClickOutcome::Resynced
            }
            Err(e) => {
                warn!(error = %e, ?action, "Reaction update failed");
                self.state.write().last_error = Some(e.to_string());
                ClickOutcome::Failed
            }
        }
    }

    /// Re-fetch stats; `None` when the fetch failed and prior stats were kept
    async fn refresh(&self) -> Option<ReactionStats> {
        let result = ReactionService::new(&self.ctx)
            .get_stats(&self.subject_id, &self.voter_id)
            .await;

        let mut state = self.state.write();
        match result {
            Ok(stats) => {
                state.stats = Some(stats.clone());
                state.last_error = None;
                Some(stats)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load reaction stats");
                state.last_error = Some(e.to_string());
                None
            }
        }
    }
}

impl std::fmt::Debug for ReactionViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionViewModel")
            .field("subject_id", &self.subject_id)
            .field("voter_id", &self.voter_id)
            .field("state", &*self.state.read())
            .field("submitting", &self.is_submitting())
            .finish()
    }
}
