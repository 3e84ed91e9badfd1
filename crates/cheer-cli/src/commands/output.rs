//! Human and JSON rendering of command results

use cheer_common::{AppError, AppResult};
use cheer_core::{Reaction, ReactionStats, SubjectId, VoterId};
use cheer_service::ClickOutcome;
use serde::Serialize;
use serde_json::json;

pub(crate) struct Printer {
    json: bool,
}

impl Printer {
    pub(crate) fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit(value: &impl Serialize) -> AppResult<()> {
        let body = serde_json::to_string_pretty(value).map_err(AppError::internal)?;
        println!("{body}");
        Ok(())
    }

    pub(crate) fn voter(&self, voter: &VoterId) -> AppResult<()> {
        if self.json {
            return Self::emit(&json!({ "voterId": voter }));
        }
        println!("{voter}");
        Ok(())
    }

    pub(crate) fn stats(&self, all: &[&ReactionStats]) -> AppResult<()> {
        if self.json {
            return Self::emit(&all);
        }
        for stats in all {
            println!("{}", render_stats(stats));
        }
        Ok(())
    }

    pub(crate) fn reactions(&self, reactions: &[Reaction]) -> AppResult<()> {
        if self.json {
            return Self::emit(&reactions);
        }
        if reactions.is_empty() {
            println!("no reactions");
        }
        for r in reactions {
            println!(
                "{}  {:<9}  voter {}  updated {}",
                r.id,
                r.kind.label(),
                r.voter_id,
                r.updated_at.to_rfc3339()
            );
        }
        Ok(())
    }

    pub(crate) fn click(&self, outcome: ClickOutcome, stats: Option<&ReactionStats>) -> AppResult<()> {
        let summary = match outcome {
            ClickOutcome::Applied(action) => match action.resulting_kind() {
                Some(kind) => format!("reacted {}", kind.label()),
                None => "reaction removed".to_string(),
            },
            ClickOutcome::Resynced => "reaction was out of date; refreshed".to_string(),
            ClickOutcome::Ignored => "click ignored".to_string(),
            ClickOutcome::Failed => "update failed".to_string(),
        };

        if self.json {
            return Self::emit(&json!({ "outcome": summary, "stats": stats }));
        }
        println!("{summary}");
        if let Some(stats) = stats {
            println!("{}", render_stats(stats));
        }
        Ok(())
    }

    pub(crate) fn removed(&self, subject: &SubjectId, voter: &VoterId) -> AppResult<()> {
        if self.json {
            return Self::emit(&json!({ "subjectId": subject, "voterId": voter, "removed": true }));
        }
        println!("removed reaction by {voter} on {subject}");
        Ok(())
    }
}

fn render_stats(stats: &ReactionStats) -> String {
    let counts: Vec<String> = stats
        .counts_by_kind
        .iter()
        .map(|(kind, count)| {
            let marker = if stats.is_selected(kind) { "*" } else { "" };
            format!("{}{marker} {count}", kind.label())
        })
        .collect();

    format!(
        "{}: {} total  [{}]  featured {}",
        stats.subject_id,
        stats.total_count,
        counts.join(", "),
        stats.featured_kind().label()
    )
}
