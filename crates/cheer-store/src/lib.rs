//! # cheer-store
//!
//! Storage layer implementing the store traits defined in `cheer-core`.
//!
//! ## Overview
//!
//! - Key-value storage backends (`MemoryStorage`, `FileStorage`)
//! - Persisted record models and record ↔ entity mappers
//! - Reaction stores: `LocalReactionStore` over key-value storage,
//!   `HttpReactionStore` over the reactions REST API, and the
//!   `SimulatedLatency` decorator
//! - `DeviceIdentity`, the per-installation voter id provider
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cheer_store::{DeviceIdentity, FileStorage, LocalReactionStore};
//!
//! fn example() -> Result<(), cheer_core::DomainError> {
//!     let storage = Arc::new(FileStorage::open("./cheer-data.json")?);
//!     let store = LocalReactionStore::open(storage.clone())?;
//!     let voter = DeviceIdentity::new(storage).voter_id()?;
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod identity;
pub mod mappers;
pub mod models;
pub mod repositories;
pub mod storage;

// Re-export commonly used types
pub use identity::{DeviceIdentity, DEVICE_ID_KEY};
pub use repositories::{HttpReactionStore, LocalReactionStore, SimulatedLatency, REACTIONS_KEY};
pub use storage::{FileStorage, MemoryStorage};
