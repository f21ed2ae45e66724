//! Entity references: opaque ids and human-readable compound keys.
//!
//! An opaque id is the canonical 36-character lowercase hyphenated hex form
//! (`8-4-4-4-12`). A compound key is a letters-only team prefix, a hyphen and
//! a base-10 sequence number (`ENG-123`). Every string is exactly one of
//! these or invalid.
//!
//! Resolution of a compound key costs two remote lookups (team by key, then
//! issue by team and number) because the API indexes issues per team. Opaque
//! ids are returned as-is without touching the remote API.

use crate::api::EntityLookup;
use crate::classify::{classify, Failure};
use crate::error::{CliError, TransportError};
use std::fmt;
use thiserror::Error;
use tracing::debug;

const OPAQUE_ID_GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// A classified user-supplied reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityReference {
    OpaqueId(String),
    CompoundKey { team_key: String, number: u64 },
}

impl EntityReference {
    /// Classify a reference. Total and side-effect free.
    pub fn parse(reference: &str) -> Result<Self, ResolveError> {
        if is_opaque_id(reference) {
            return Ok(EntityReference::OpaqueId(reference.to_string()));
        }
        parse_compound_key(reference)
            .map(|(team_key, number)| EntityReference::CompoundKey { team_key, number })
            .ok_or_else(|| ResolveError::InvalidReference(reference.to_string()))
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityReference::OpaqueId(id) => f.write_str(id),
            EntityReference::CompoundKey { team_key, number } => {
                write!(f, "{}-{}", team_key, number)
            }
        }
    }
}

/// True when `s` has the canonical lowercase hyphenated unique-id shape.
pub fn is_opaque_id(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == OPAQUE_ID_GROUPS.len()
        && groups
            .iter()
            .zip(OPAQUE_ID_GROUPS)
            .all(|(group, len)| {
                group.len() == len
                    && group
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            })
}

/// Split on the last hyphen; the prefix is letters only (normalized to
/// uppercase), the suffix plain base-10 digits without leading zeros.
fn parse_compound_key(s: &str) -> Option<(String, u64)> {
    let (prefix, suffix) = s.rsplit_once('-')?;
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if suffix.len() > 1 && suffix.starts_with('0') {
        return None;
    }
    let number = suffix.parse::<u64>().ok()?;
    Some((prefix.to_ascii_uppercase(), number))
}

/// The opaque id used to address the remote API. Lives for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId(String);

impl ResolvedId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolution failures.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid issue ID or identifier: {0}. Expected UUID or format like ENG-123.")]
    InvalidReference(String),

    #[error("Team with key \"{0}\" not found")]
    TeamNotFound(String),

    #[error("Issue {0} not found")]
    EntityNotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidReference(_) => CliError::invalid_input(err.to_string()),
            ResolveError::TeamNotFound(_) | ResolveError::EntityNotFound(_) => {
                CliError::not_found(err.to_string())
            }
            ResolveError::Transport(inner) => classify(&Failure::from(inner)),
        }
    }
}

/// Turns references into opaque ids through an [`EntityLookup`].
pub struct IdentifierResolver<'a, L: EntityLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: EntityLookup + ?Sized> IdentifierResolver<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    pub async fn resolve(&self, reference: &str) -> Result<ResolvedId, ResolveError> {
        let (team_key, number) = match EntityReference::parse(reference)? {
            EntityReference::OpaqueId(id) => return Ok(ResolvedId(id)),
            EntityReference::CompoundKey { team_key, number } => (team_key, number),
        };

        debug!(team_key = %team_key, number, "resolving compound key");
        let teams = self.lookup.find_teams_by_key(&team_key).await?;
        // Keys are unique per workspace; take the first if the API ever disagrees.
        let team = teams
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::TeamNotFound(team_key.clone()))?;

        let issue = self
            .lookup
            .find_issue_by_team_and_number(&team.id, number)
            .await?
            .ok_or_else(|| ResolveError::EntityNotFound(reference.to_string()))?;

        debug!(reference, id = %issue.id, "resolved compound key");
        Ok(ResolvedId(issue.id))
    }
}
