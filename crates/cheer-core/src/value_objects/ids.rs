//! String identifiers for subjects, voters, and reaction records
//!
//! All three are opaque strings on the wire. They are validated on
//! construction so an empty or garbage id never reaches a store.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest identifier accepted from callers or storage
pub const MAX_ID_LEN: usize = 128;

/// URL-safe alphabet for generated voter ids (64 symbols, 6 bits each)
const URL_SAFE_ALPHABET: &[u8; 64] =
    b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Voter id length; 21 symbols of 6 bits = 126 bits of entropy
const VOTER_ID_LEN: usize = 21;

/// Random suffix length of generated reaction ids
const REACTION_ID_SUFFIX_LEN: usize = 9;

/// Error when an identifier fails validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("{kind} must be at most {max} characters")]
    TooLong { kind: &'static str, max: usize },

    #[error("{kind} must not contain control characters")]
    ControlCharacter { kind: &'static str },
}

fn validate(kind: &'static str, raw: &str) -> Result<(), IdParseError> {
    if raw.trim().is_empty() {
        return Err(IdParseError::Empty { kind });
    }
    if raw.chars().count() > MAX_ID_LEN {
        return Err(IdParseError::TooLong {
            kind,
            max: MAX_ID_LEN,
        });
    }
    if raw.chars().any(char::is_control) {
        return Err(IdParseError::ControlCharacter { kind });
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a raw identifier
            pub fn parse(raw: impl Into<String>) -> Result<Self, IdParseError> {
                let raw = raw.into();
                validate($kind, &raw)?;
                Ok(Self(raw))
            }

            /// Borrow the raw identifier
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take the raw identifier
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// The entity being reacted to (an employee id)
    SubjectId,
    "subject id"
);

string_id!(
    /// Anonymous per-installation identity casting a reaction
    VoterId,
    "voter id"
);

string_id!(
    /// Opaque id of a stored reaction record
    ReactionId,
    "reaction id"
);

impl ReactionId {
    /// Mint a record id of the form `{epoch_millis}-{9 base36 chars}`
    pub fn generate(now: DateTime<Utc>) -> Self {
        const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut rng = rand::thread_rng();
        let suffix: String = (0..REACTION_ID_SUFFIX_LEN)
            .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
            .collect();
        Self(format!("{}-{suffix}", now.timestamp_millis()))
    }
}

/// Mint a fresh 21-character URL-safe voter id
pub fn generate_voter_id() -> VoterId {
    let mut rng = rand::thread_rng();
    let id: String = (0..VOTER_ID_LEN)
        .map(|_| char::from(URL_SAFE_ALPHABET[rng.gen_range(0..URL_SAFE_ALPHABET.len())]))
        .collect();
    VoterId(id)
}
