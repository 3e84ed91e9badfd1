//! Key-value storage backends
//!
//! Implementations of `KeyValueStorage` shared by the local reaction store
//! and the device identity provider.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
