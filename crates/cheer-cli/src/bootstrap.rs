//! Dependency wiring
//!
//! Turns an `AppConfig` into a ready `ServiceContext`: storage, store,
//! optional simulated latency, and device identity.

use std::sync::Arc;

use cheer_common::{AppConfig, AppResult, StoreBackend};
use cheer_core::traits::{KeyValueStorage, ReactionStore};
use cheer_service::{ServiceContext, ServiceContextBuilder};
use cheer_store::{
    DeviceIdentity, FileStorage, HttpReactionStore, LocalReactionStore, MemoryStorage,
    SimulatedLatency,
};
use tracing::info;

/// Build the service context described by `config`
///
/// The device id always lives in local storage, even when reactions are
/// kept by the remote API.
pub fn create_service_context(config: &AppConfig) -> AppResult<ServiceContext> {
    let settings = &config.store;

    let local: Arc<dyn KeyValueStorage> = match settings.backend {
        StoreBackend::Memory => Arc::new(MemoryStorage::new()),
        StoreBackend::File | StoreBackend::Http => {
            info!(path = %settings.data_path.display(), "Opening local storage");
            Arc::new(FileStorage::open(&settings.data_path)?)
        }
    };

    let store: Arc<dyn ReactionStore> = match settings.backend {
        StoreBackend::Memory | StoreBackend::File => {
            let store: Arc<dyn ReactionStore> = Arc::new(LocalReactionStore::open(local.clone())?);
            match settings.simulated_latency() {
                Some(delay) => {
                    info!(delay_ms = delay.as_millis() as u64, "Simulating store latency");
                    Arc::new(SimulatedLatency::new(store, delay))
                }
                None => store,
            }
        }
        StoreBackend::Http => {
            info!(url = %settings.api_url, "Using reactions API");
            Arc::new(HttpReactionStore::new(
                &settings.api_url,
                settings.request_timeout(),
            )?)
        }
    };

    let ctx = ServiceContextBuilder::new()
        .store(store)
        .identity(Arc::new(DeviceIdentity::new(local)))
        .build()?;

    info!(backend = ?settings.backend, "Service context ready");
    Ok(ctx)
}
