//! Reaction kind - the closed set of reactions a voter can cast

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed reaction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Celebrate,
    Clap,
    Fire,
}

impl ReactionKind {
    /// All kinds in display order
    pub const ALL: [ReactionKind; 5] = [
        Self::Like,
        Self::Love,
        Self::Celebrate,
        Self::Clap,
        Self::Fire,
    ];

    /// Wire name (`like`, `love`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Celebrate => "celebrate",
            Self::Clap => "clap",
            Self::Fire => "fire",
        }
    }

    /// Human readable label shown in tooltips
    pub const fn label(self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Love => "Love",
            Self::Celebrate => "Celebrate",
            Self::Clap => "Clap",
            Self::Fire => "Fire",
        }
    }

    /// Accent color used when rendering the reaction
    pub const fn color(self) -> &'static str {
        match self {
            Self::Like => "#3b82f6",
            Self::Love => "#ef4444",
            Self::Celebrate => "#f59e0b",
            Self::Clap => "#10b981",
            Self::Fire => "#f97316",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a reaction kind from an unknown name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reaction kind: {0}")]
pub struct UnknownReactionKind(pub String);

impl FromStr for ReactionKind {
    type Err = UnknownReactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownReactionKind(s.to_string()))
    }
}
