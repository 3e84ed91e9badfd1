//! # cheer-service
//!
//! Application layer: reaction use cases over a `ReactionStore`, request DTOs,
//! and the per-subject view-model a UI binds to.

pub mod dto;
pub mod services;
pub mod view_model;

#[cfg(test)]
mod test_support;

pub use dto::{AddReactionRequest, ChangeReactionRequest, RemoveReactionRequest};
pub use services::{
    ReactionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
pub use view_model::{ClickOutcome, ReactionViewModel};
