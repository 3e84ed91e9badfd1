//! Value objects - immutable types that represent domain concepts

mod ids;
mod kind;

pub use ids::{generate_voter_id, IdParseError, ReactionId, SubjectId, VoterId, MAX_ID_LEN};
pub use kind::{ReactionKind, UnknownReactionKind};
