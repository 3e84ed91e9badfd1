//! Device identity provider
//!
//! Supplies the anonymous per-installation voter id. The id is minted once,
//! persisted, and memoized for the lifetime of the provider.

use std::sync::Arc;

use cheer_core::traits::{KeyValueStorage, RepoResult};
use cheer_core::value_objects::{generate_voter_id, VoterId};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Storage key holding the voter id
pub const DEVICE_ID_KEY: &str = "birthday-app-device-id";

/// Stable voter id for this installation
pub struct DeviceIdentity {
    storage: Arc<dyn KeyValueStorage>,
    cached: Mutex<Option<VoterId>>,
}

impl DeviceIdentity {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            cached: Mutex::new(None),
        }
    }

    /// The voter id, minting and persisting one on first use
    ///
    /// A storage failure is returned rather than papered over with a fresh
    /// id, since an id that is not persisted would change on every call.
    pub fn voter_id(&self) -> RepoResult<VoterId> {
        let mut cached = self.cached.lock();
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        if let Some(raw) = self.storage.get(DEVICE_ID_KEY)? {
            match VoterId::parse(raw) {
                Ok(id) => {
                    *cached = Some(id.clone());
                    return Ok(id);
                }
                Err(e) => warn!(error = %e, "Stored device id is unusable, minting a new one"),
            }
        }

        let id = generate_voter_id();
        self.storage.set(DEVICE_ID_KEY, id.as_str())?;
        info!(voter_id = %id, "Minted device id");

        *cached = Some(id.clone());
        Ok(id)
    }

    /// Forget the persisted id so the next `voter_id` call mints a new one
    pub fn reset(&self) -> RepoResult<()> {
        let mut cached = self.cached.lock();
        self.storage.remove(DEVICE_ID_KEY)?;
        *cached = None;
        Ok(())
    }
}
