use gauss_registry::RegistryError;
use gauss_types::{MatchId, PollType, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("sign in to vote")]
    Unauthorized,

    #[error("poll {poll_type} for match {match_id} closed at {closed_at}")]
    PollClosed {
        match_id: MatchId,
        poll_type: PollType,
        closed_at: Timestamp,
    },

    #[error("{0}")]
    NotFound(#[from] RegistryError),

    #[error("'{option}' is not an option of poll {poll_type}")]
    InvalidOption { option: String, poll_type: PollType },
}
