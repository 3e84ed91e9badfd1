//! Durable key-value storage primitive
//!
//! The local-storage shaped port underneath the local reaction store and the
//! device identity provider. Calls are synchronous and complete the write
//! before returning.

use super::store::RepoResult;

pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> RepoResult<()>;
}
