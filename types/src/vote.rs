//! Vote records and the identities that cast them.

use serde::{Deserialize, Serialize};

use crate::match_id::MatchId;
use crate::poll::PollType;
use crate::time::Timestamp;

/// Placeholder display name for voters who never shared one.
pub const ANONYMOUS_NAME: &str = "Empty";

/// One row of the append-only vote ledger.
///
/// Rows are never updated or deleted. A later row by the same user for the same
/// poll supersedes earlier ones at read time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub match_id: MatchId,
    pub poll_type: PollType,
    pub option_voted: String,
    pub user_email: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_timestamp: Timestamp,
}

impl Vote {
    /// Display name, falling back to [`ANONYMOUS_NAME`].
    pub fn display_name(&self) -> &str {
        match self.user_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_NAME,
        }
    }

    pub fn voter(&self) -> Voter {
        Voter {
            name: self.display_name().to_string(),
            email: self.user_email.clone(),
        }
    }
}

/// An entry of an option's voter roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub name: String,
    pub email: String,
}

/// The authenticated user behind a request.
///
/// Identity is established by the upstream identity provider; the polls only see
/// the resulting stable email and optional display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    pub name: Option<String>,
}

impl Principal {
    /// Build a principal, or `None` when no usable email is present.
    pub fn from_parts(email: Option<&str>, name: Option<&str>) -> Option<Self> {
        let email = email.map(str::trim).filter(|e| !e.is_empty())?;
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Some(Self {
            email: email.to_string(),
            name,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS_NAME)
    }
}
