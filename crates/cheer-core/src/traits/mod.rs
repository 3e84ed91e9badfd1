//! Traits (ports) implemented by the infrastructure layer

mod clock;
mod storage;
mod store;

pub use clock::{Clock, SystemClock};
pub use storage::KeyValueStorage;
pub use store::{ReactionStore, RepoResult};
