//! # cheer-core
//!
//! Domain layer for birthday-card reactions: entities, value objects, the
//! click routing policy, and the store/storage traits.
//! This crate has zero dependencies on infrastructure (storage backends, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{KindCounts, NewReaction, Reaction, ReactionAction, ReactionStats};
pub use error::DomainError;
pub use traits::{Clock, KeyValueStorage, ReactionStore, RepoResult, SystemClock};
pub use value_objects::{
    generate_voter_id, IdParseError, ReactionId, ReactionKind, SubjectId, UnknownReactionKind,
    VoterId,
};
