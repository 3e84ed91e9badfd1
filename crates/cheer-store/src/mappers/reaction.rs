//! Reaction entity <-> record mapper

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use cheer_core::entities::Reaction;
use cheer_core::value_objects::{ReactionId, SubjectId, VoterId};
use cheer_core::DomainError;
use tracing::warn;

use crate::models::{ReactionRequest, StoredReaction};

fn from_millis(field: &str, millis: i64) -> Result<DateTime<Utc>, DomainError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| DomainError::CorruptData(format!("{field} out of range: {millis}")))
}

/// Convert a StoredReaction record to a Reaction entity
impl TryFrom<StoredReaction> for Reaction {
    type Error = DomainError;

    fn try_from(record: StoredReaction) -> Result<Self, Self::Error> {
        let corrupt = |e: cheer_core::IdParseError| DomainError::CorruptData(e.to_string());

        let updated_at = from_millis("timestamp", record.timestamp)?;
        let created_at = match record.created_at {
            Some(millis) => from_millis("createdAt", millis)?,
            None => updated_at,
        };

        Ok(Reaction {
            id: ReactionId::parse(record.id).map_err(corrupt)?,
            subject_id: SubjectId::parse(record.employee_id).map_err(corrupt)?,
            voter_id: VoterId::parse(record.device_id).map_err(corrupt)?,
            kind: record.reaction_type,
            created_at,
            updated_at,
        })
    }
}

/// Convert a Reaction entity to its persisted record
impl From<&Reaction> for StoredReaction {
    fn from(reaction: &Reaction) -> Self {
        StoredReaction {
            id: reaction.id.as_str().to_string(),
            employee_id: reaction.subject_id.as_str().to_string(),
            device_id: reaction.voter_id.as_str().to_string(),
            reaction_type: reaction.kind,
            timestamp: reaction.updated_at.timestamp_millis(),
            created_at: Some(reaction.created_at.timestamp_millis()),
        }
    }
}

impl From<&cheer_core::NewReaction> for ReactionRequest {
    fn from(draft: &cheer_core::NewReaction) -> Self {
        ReactionRequest {
            employee_id: draft.subject_id.as_str().to_string(),
            device_id: draft.voter_id.as_str().to_string(),
            reaction_type: draft.kind,
        }
    }
}

/// Result of decoding a raw record array
#[derive(Debug, Default)]
pub struct DecodedRecords {
    /// Valid reactions, at most one per `(subject, voter)` pair
    pub reactions: Vec<Reaction>,
    /// Records that could not be decoded
    pub skipped: usize,
    /// Older duplicates dropped for an already-seen pair
    pub duplicates: usize,
}

impl DecodedRecords {
    /// Whether decoding changed anything compared to the raw input
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.duplicates == 0
    }
}

/// Decode raw JSON records, dropping invalid entries and duplicate pairs
///
/// When a pair occurs more than once the most recently updated record wins.
pub fn decode_records(values: Vec<serde_json::Value>) -> DecodedRecords {
    let mut decoded = DecodedRecords::default();
    let mut by_pair: HashMap<(SubjectId, VoterId), usize> = HashMap::new();

    for value in values {
        let reaction = match serde_json::from_value::<StoredReaction>(value)
            .map_err(|e| DomainError::CorruptData(e.to_string()))
            .and_then(Reaction::try_from)
        {
            Ok(reaction) => reaction,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable reaction record");
                decoded.skipped += 1;
                continue;
            }
        };

        let pair = (reaction.subject_id.clone(), reaction.voter_id.clone());
        match by_pair.get(&pair).copied() {
            Some(index) => {
                decoded.duplicates += 1;
                if reaction.updated_at >= decoded.reactions[index].updated_at {
                    decoded.reactions[index] = reaction;
                }
            }
            None => {
                by_pair.insert(pair, decoded.reactions.len());
                decoded.reactions.push(reaction);
            }
        }
    }

    if decoded.duplicates > 0 {
        warn!(
            duplicates = decoded.duplicates,
            "Collapsed duplicate reactions for the same voter"
        );
    }

    decoded
}
