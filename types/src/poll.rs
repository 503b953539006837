//! Poll type discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GaussError;

/// Which poll of a match a vote addresses.
///
/// Every match carries the two regular polls. Ad-hoc polls are registered
/// separately with their own options and closing times.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PollType {
    /// Which of the two teams wins.
    Winner,
    /// By how much the winner wins, as a tier key `A`..`D`.
    VictoryMargin,
    /// A special poll identified by its registered name.
    Adhoc(String),
}

impl PollType {
    pub const WINNER: &'static str = "winner";
    pub const VICTORY_MARGIN: &'static str = "victory_margin";

    /// Wire name of this poll type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Winner => Self::WINNER,
            Self::VictoryMargin => Self::VICTORY_MARGIN,
            Self::Adhoc(name) => name,
        }
    }

    /// Regular polls share the match's closing time.
    pub fn is_regular(&self) -> bool {
        !matches!(self, Self::Adhoc(_))
    }
}

impl FromStr for PollType {
    type Err = GaussError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(GaussError::EmptyPollType),
            Self::WINNER => Ok(Self::Winner),
            Self::VICTORY_MARGIN => Ok(Self::VictoryMargin),
            other => Ok(Self::Adhoc(other.to_string())),
        }
    }
}

impl TryFrom<String> for PollType {
    type Error = GaussError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PollType> for String {
    fn from(p: PollType) -> Self {
        match p {
            PollType::Adhoc(name) => name,
            regular => regular.as_str().to_string(),
        }
    }
}

impl fmt::Display for PollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
