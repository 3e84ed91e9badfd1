//! Reaction use cases
//!
//! Services are stateless views over a `ServiceContext`; the store owns all
//! durable state.

pub mod context;
pub mod error;
pub mod reaction;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
