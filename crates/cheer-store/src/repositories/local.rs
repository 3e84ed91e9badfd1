//! Key-value backed implementation of ReactionStore
//!
//! The whole record set is one JSON array under a single key. Each mutation
//! is a read-modify-write of that array, serialized by a store-wide lock and
//! persisted before the call returns. Storage access may block on disk I/O,
//! so every call runs on tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use cheer_core::entities::{NewReaction, Reaction};
use cheer_core::traits::{Clock, KeyValueStorage, ReactionStore, RepoResult, SystemClock};
use cheer_core::value_objects::{ReactionKind, SubjectId, VoterId};
use cheer_core::DomainError;

use crate::mappers::decode_records;
use crate::models::StoredReaction;

/// Storage key holding the reaction array
pub const REACTIONS_KEY: &str = "birthday-reactions";

/// The record array and the lock serializing access to it
struct Records {
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    key: String,
    // Guards every read-modify-write of the record array
    lock: Mutex<()>,
}

impl Records {
    fn decode(&self, raw: &str) -> RepoResult<(Vec<Reaction>, bool)> {
        if raw.trim().is_empty() {
            return Ok((Vec::new(), true));
        }
        let values: Vec<serde_json::Value> = serde_json::from_str(raw).map_err(|e| {
            DomainError::CorruptData(format!("{} is not a JSON array: {e}", self.key))
        })?;
        let decoded = decode_records(values);
        let clean = decoded.is_clean();
        Ok((decoded.reactions, clean))
    }

    /// Current record set; caller must hold `lock` when it intends to write back
    fn load(&self) -> RepoResult<Vec<Reaction>> {
        match self.storage.get(&self.key)? {
            Some(raw) => Ok(self.decode(&raw)?.0),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, reactions: &[Reaction]) -> RepoResult<()> {
        let records: Vec<StoredReaction> = reactions.iter().map(StoredReaction::from).collect();
        let body =
            serde_json::to_string(&records).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.storage.set(&self.key, &body)
    }

    /// Create the array if absent, rewrite it if it held bad or duplicate records
    fn initialize(&self) -> RepoResult<()> {
        let _guard = self.lock.lock();
        match self.storage.get(&self.key)? {
            None => self.save(&[]),
            Some(raw) => {
                let (reactions, clean) = self.decode(&raw)?;
                if !clean {
                    warn!(key = %self.key, kept = reactions.len(), "Repairing stored reactions");
                    self.save(&reactions)?;
                }
                Ok(())
            }
        }
    }

    fn list(&self, subject_id: &SubjectId) -> RepoResult<Vec<Reaction>> {
        let _guard = self.lock.lock();
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| &r.subject_id == subject_id)
            .collect())
    }

    fn find(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<Option<Reaction>> {
        let _guard = self.lock.lock();
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.is_for(subject_id, voter_id)))
    }

    fn insert(&self, draft: NewReaction) -> RepoResult<Reaction> {
        let _guard = self.lock.lock();
        let mut reactions = self.load()?;

        if reactions
            .iter()
            .any(|r| r.is_for(&draft.subject_id, &draft.voter_id))
        {
            return Err(DomainError::conflict(&draft.subject_id, &draft.voter_id));
        }

        let reaction = Reaction::new(draft, self.clock.now());
        reactions.push(reaction.clone());
        self.save(&reactions)?;
        Ok(reaction)
    }

    fn replace(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        kind: ReactionKind,
    ) -> RepoResult<Reaction> {
        let _guard = self.lock.lock();
        let mut reactions = self.load()?;

        let reaction = reactions
            .iter_mut()
            .find(|r| r.is_for(subject_id, voter_id))
            .ok_or_else(|| DomainError::not_found(subject_id, voter_id))?;
        reaction.rekind(kind, self.clock.now());
        let updated = reaction.clone();

        self.save(&reactions)?;
        Ok(updated)
    }

    fn delete(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<()> {
        let _guard = self.lock.lock();
        let mut reactions = self.load()?;

        let before = reactions.len();
        reactions.retain(|r| !r.is_for(subject_id, voter_id));
        if reactions.len() == before {
            return Err(DomainError::not_found(subject_id, voter_id));
        }

        self.save(&reactions)
    }
}

/// Reaction store over a local key-value storage
pub struct LocalReactionStore {
    records: Arc<Records>,
}

impl LocalReactionStore {
    /// Open the store under the default key with the system clock
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> RepoResult<Self> {
        Self::open_with(storage, Arc::new(SystemClock), REACTIONS_KEY)
    }

    /// Open the store with an explicit clock and storage key
    ///
    /// Initializes an empty array if the key is absent and rewrites the
    /// stored array if it held unreadable or duplicate records.
    #[instrument(skip(storage, clock))]
    pub fn open_with(
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
        key: &str,
    ) -> RepoResult<Self> {
        let records = Records {
            storage,
            clock,
            key: key.to_string(),
            lock: Mutex::new(()),
        };
        records.initialize()?;

        debug!(key = %records.key, "Local reaction store opened");
        Ok(Self {
            records: Arc::new(records),
        })
    }

    /// Run `op` against the record array on the blocking pool
    async fn blocking<T, F>(&self, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Records) -> RepoResult<T> + Send + 'static,
    {
        let records = Arc::clone(&self.records);
        tokio::task::spawn_blocking(move || op(&records))
            .await
            .map_err(|e| DomainError::Internal(format!("store worker join failed: {e}")))?
    }
}

#[async_trait]
impl ReactionStore for LocalReactionStore {
    #[instrument(skip(self))]
    async fn list(&self, subject_id: &SubjectId) -> RepoResult<Vec<Reaction>> {
        let subject_id = subject_id.clone();
        self.blocking(move |records| records.list(&subject_id)).await
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
    ) -> RepoResult<Option<Reaction>> {
        let (subject_id, voter_id) = (subject_id.clone(), voter_id.clone());
        self.blocking(move |records| records.find(&subject_id, &voter_id))
            .await
    }

    #[instrument(skip(self))]
    async fn insert(&self, reaction: NewReaction) -> RepoResult<Reaction> {
        let reaction = self.blocking(move |records| records.insert(reaction)).await?;
        info!(
            subject_id = %reaction.subject_id,
            voter_id = %reaction.voter_id,
            kind = %reaction.kind,
            "Reaction stored"
        );
        Ok(reaction)
    }

    #[instrument(skip(self))]
    async fn replace(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        kind: ReactionKind,
    ) -> RepoResult<Reaction> {
        let (subject_id, voter_id) = (subject_id.clone(), voter_id.clone());
        self.blocking(move |records| records.replace(&subject_id, &voter_id, kind))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<()> {
        let (subject_id, voter_id) = (subject_id.clone(), voter_id.clone());
        self.blocking(move |records| records.delete(&subject_id, &voter_id))
            .await
    }
}
