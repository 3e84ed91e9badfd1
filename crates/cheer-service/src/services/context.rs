//! Service context - dependency container for services
//!
//! Holds the reaction store and the device identity provider. Constructed
//! explicitly by the caller; there is no process-wide instance.

use std::sync::Arc;

use cheer_core::traits::ReactionStore;
use cheer_core::VoterId;
use cheer_store::DeviceIdentity;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn ReactionStore>,
    identity: Arc<DeviceIdentity>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(store: Arc<dyn ReactionStore>, identity: Arc<DeviceIdentity>) -> Self {
        Self { store, identity }
    }

    /// Get the reaction store
    pub fn store(&self) -> &dyn ReactionStore {
        self.store.as_ref()
    }

    /// Get the device identity provider
    pub fn identity(&self) -> &DeviceIdentity {
        self.identity.as_ref()
    }

    /// Voter id of this installation
    pub fn voter_id(&self) -> ServiceResult<VoterId> {
        Ok(self.identity.voter_id()?)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn ReactionStore")
            .field("identity", &"DeviceIdentity")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn ReactionStore>>,
    identity: Option<Arc<DeviceIdentity>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn ReactionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn identity(mut self, identity: Arc<DeviceIdentity>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.identity
                .ok_or_else(|| ServiceError::validation("identity is required"))?,
        ))
    }
}
