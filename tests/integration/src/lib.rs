//! Integration test utilities for the reaction subsystem
//!
//! This crate provides an in-process reactions API backend and fixtures for
//! running end-to-end tests against every store backend.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
