//! Reaction record model
//!
//! The at-rest layout is a JSON array of these records under one key. The
//! reactions API uses the same record shape on the wire.

use cheer_core::ReactionKind;
use serde::{Deserialize, Serialize};

/// One persisted reaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReaction {
    pub id: String,
    pub employee_id: String,
    pub device_id: String,
    pub reaction_type: ReactionKind,
    /// Epoch milliseconds of the last mutation
    pub timestamp: i64,
    /// Epoch milliseconds of creation; absent in records written before it existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Body of add/update calls against the reactions API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub employee_id: String,
    pub device_id: String,
    pub reaction_type: ReactionKind,
}
