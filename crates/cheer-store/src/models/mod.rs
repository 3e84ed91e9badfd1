//! Persisted and wire record models

mod reaction;

pub use reaction::{ReactionRequest, StoredReaction};
