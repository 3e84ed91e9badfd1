//! Command definitions and dispatch

use clap::{Parser, Subcommand};

use cheer_common::{AppError, AppResult};
use cheer_core::{ReactionKind, SubjectId, VoterId};
use cheer_service::{
    AddReactionRequest, ChangeReactionRequest, ClickOutcome, ReactionService, ReactionViewModel,
    RemoveReactionRequest, ServiceContext,
};

mod output;

use output::Printer;

#[derive(Debug, Parser)]
#[command(name = "cheer")]
#[command(about = "Reactions on birthday cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show this installation's voter id
    Voter {
        /// Forget the current id and mint a new one
        #[arg(long)]
        reset: bool,
    },

    /// Show reaction stats for one or more subjects
    Stats {
        /// Subject ids
        #[arg(required = true)]
        subjects: Vec<SubjectId>,
    },

    /// List every reaction on a subject
    List {
        /// Subject id
        subject: SubjectId,
    },

    /// Click a reaction: adds it, switches to it, or toggles it off
    React {
        /// Subject id
        subject: SubjectId,

        /// Reaction kind (like, love, celebrate, clap, fire)
        kind: ReactionKind,
    },

    /// Add a reaction; fails if the voter already reacted
    Add {
        subject: SubjectId,
        kind: ReactionKind,

        /// Act as this voter instead of the installation's own
        #[arg(long)]
        voter: Option<VoterId>,
    },

    /// Change an existing reaction to another kind
    Change {
        subject: SubjectId,
        kind: ReactionKind,

        /// Act as this voter instead of the installation's own
        #[arg(long)]
        voter: Option<VoterId>,
    },

    /// Remove a reaction
    Remove {
        subject: SubjectId,

        /// Act as this voter instead of the installation's own
        #[arg(long)]
        voter: Option<VoterId>,
    },
}

fn voter_or_own(ctx: &ServiceContext, voter: Option<VoterId>) -> AppResult<VoterId> {
    match voter {
        Some(voter) => Ok(voter),
        None => Ok(ctx.voter_id()?),
    }
}

/// Execute one command against `ctx`
pub async fn run(command: Command, ctx: &ServiceContext, json: bool) -> AppResult<()> {
    let printer = Printer::new(json);
    let service = ReactionService::new(ctx);

    match command {
        Command::Voter { reset } => {
            if reset {
                ctx.identity().reset()?;
            }
            printer.voter(&ctx.voter_id()?)
        }
        Command::Stats { subjects } => {
            let voter = ctx.voter_id()?;
            let bulk = service.get_bulk_stats(&subjects, &voter).await?;
            let mut seen = std::collections::HashSet::new();
            let ordered: Vec<_> = subjects
                .iter()
                .filter(|s| seen.insert(*s))
                .filter_map(|s| bulk.get(s))
                .collect();
            printer.stats(&ordered)
        }
        Command::List { subject } => {
            let reactions = service.list_reactions(&subject).await?;
            printer.reactions(&reactions)
        }
        Command::React { subject, kind } => {
            let vm = ReactionViewModel::for_installation(ctx.clone(), subject)?;
            if vm.load().await.is_none() {
                return Err(AppError::Storage(
                    vm.last_error().unwrap_or_else(|| "stats unavailable".to_string()),
                ));
            }
            let outcome = vm.click(kind).await;
            if outcome == ClickOutcome::Failed {
                return Err(AppError::Storage(
                    vm.last_error().unwrap_or_else(|| "update failed".to_string()),
                ));
            }
            printer.click(outcome, vm.stats().as_ref())
        }
        Command::Add {
            subject,
            kind,
            voter,
        } => {
            let voter = voter_or_own(ctx, voter)?;
            let reaction = service
                .add_reaction(AddReactionRequest::new(&subject, &voter, kind))
                .await?;
            printer.reactions(std::slice::from_ref(&reaction))
        }
        Command::Change {
            subject,
            kind,
            voter,
        } => {
            let voter = voter_or_own(ctx, voter)?;
            let reaction = service
                .change_reaction(ChangeReactionRequest::new(&subject, &voter, kind))
                .await?;
            printer.reactions(std::slice::from_ref(&reaction))
        }
        Command::Remove { subject, voter } => {
            let voter = voter_or_own(ctx, voter)?;
            service
                .remove_reaction(RemoveReactionRequest::new(&subject, &voter))
                .await?;
            printer.removed(&subject, &voter)
        }
    }
}
