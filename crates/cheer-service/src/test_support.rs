//! Store double and fixtures shared by the service and view-model tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cheer_core::entities::{NewReaction, Reaction};
use cheer_core::traits::{ReactionStore, RepoResult};
use cheer_core::{DomainError, ReactionKind, SubjectId, VoterId};
use cheer_store::{DeviceIdentity, LocalReactionStore, MemoryStorage};
use tokio::sync::Notify;

use crate::services::ServiceContext;

/// Local store that can be told to fail or to hold writes until released
pub(crate) struct ScriptedStore {
    inner: LocalReactionStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    hold_writes: AtomicBool,
    release: Notify,
    writes: AtomicUsize,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: LocalReactionStore::open(Arc::new(MemoryStorage::new())).unwrap(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            hold_writes: AtomicBool::new(false),
            release: Notify::new(),
            writes: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Park every write until `release_writes` is called
    pub(crate) fn hold_writes(&self) {
        self.hold_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn release_writes(&self) {
        self.hold_writes.store(false, Ordering::SeqCst);
        self.release.notify_waiters();
    }

    /// Writes that reached the store, successful or not
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Write behind the caller's back, as another client would
    pub(crate) fn inner(&self) -> &LocalReactionStore {
        &self.inner
    }

    fn check_read(&self) -> RepoResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::transient("read timed out"));
        }
        Ok(())
    }

    async fn enter_write(&self) -> RepoResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        while self.hold_writes.load(Ordering::SeqCst) {
            let released = self.release.notified();
            if !self.hold_writes.load(Ordering::SeqCst) {
                break;
            }
            released.await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::transient("write timed out"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReactionStore for ScriptedStore {
    async fn list(&self, subject_id: &SubjectId) -> RepoResult<Vec<Reaction>> {
        self.check_read()?;
        self.inner.list(subject_id).await
    }

    async fn find(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
    ) -> RepoResult<Option<Reaction>> {
        self.check_read()?;
        self.inner.find(subject_id, voter_id).await
    }

    async fn insert(&self, reaction: NewReaction) -> RepoResult<Reaction> {
        self.enter_write().await?;
        self.inner.insert(reaction).await
    }

    async fn replace(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        kind: ReactionKind,
    ) -> RepoResult<Reaction> {
        self.enter_write().await?;
        self.inner.replace(subject_id, voter_id, kind).await
    }

    async fn delete(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<()> {
        self.enter_write().await?;
        self.inner.delete(subject_id, voter_id).await
    }
}

/// Fresh context over an in-memory scripted store
pub(crate) fn context() -> (ServiceContext, Arc<ScriptedStore>) {
    let store = Arc::new(ScriptedStore::new());
    let identity = Arc::new(DeviceIdentity::new(Arc::new(MemoryStorage::new())));
    (ServiceContext::new(store.clone(), identity), store)
}

pub(crate) fn ids(subject: &str, voter: &str) -> (SubjectId, VoterId) {
    (SubjectId::parse(subject).unwrap(), VoterId::parse(voter).unwrap())
}
