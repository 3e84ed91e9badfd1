//! Test fixtures and data generators
//!
//! Provides unique ids so tests sharing a backend never see each other's
//! reactions.

use std::sync::atomic::{AtomicU64, Ordering};

use cheer_core::{SubjectId, VoterId};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A subject no other test reacts to
pub fn unique_subject() -> SubjectId {
    SubjectId::parse(format!("employee-{}", unique_suffix())).expect("valid subject id")
}

/// A voter no other test uses
pub fn unique_voter() -> VoterId {
    VoterId::parse(format!("device-{}", unique_suffix())).expect("valid voter id")
}
