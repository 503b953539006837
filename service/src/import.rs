//! Bulk loading of registry and scoring data.
//!
//! Matches, ad-hoc polls, settlements and picks are produced outside the service.
//! A season file gathers them into one TOML document:
//!
//! ```toml
//! [[matches]]
//! match_id = "1"
//! team_1 = "CSK"
//! team_2 = "MI"
//! date = "2024-03-22T14:00:00Z"
//! poll_close_time = "2024-03-22T13:30:00Z"
//! ```
//!
//! Timestamps are quoted strings; bare TOML datetimes are not accepted.

use gauss_types::{AdhocPollRow, MatchPick, MatchRecord, SettlementRecord};
use serde::{Deserialize, Serialize};

use crate::ServiceError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonData {
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub adhoc_polls: Vec<AdhocPollRow>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
    #[serde(default)]
    pub picks: Vec<MatchPick>,
}

impl SeasonData {
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }
}

/// Rows written by one import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub matches: usize,
    pub adhoc_options: usize,
    pub settlements: usize,
    pub picks: usize,
}
