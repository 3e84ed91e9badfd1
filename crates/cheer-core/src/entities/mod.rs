//! Domain entities - core business objects

mod reaction;
mod stats;

pub use reaction::{NewReaction, Reaction, ReactionAction};
pub use stats::{KindCounts, ReactionStats};
