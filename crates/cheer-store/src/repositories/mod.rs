//! Reaction store implementations
//!
//! Implementations of the `ReactionStore` trait defined in cheer-core.

mod error;
mod http;
mod latency;
mod local;

pub use http::HttpReactionStore;
pub use latency::SimulatedLatency;
pub use local::{LocalReactionStore, REACTIONS_KEY};
