use gauss_types::{MatchId, PollType};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("match {0} is not registered")]
    MatchNotFound(MatchId),

    #[error("poll {poll_type} is not registered for match {match_id}")]
    PollNotFound { match_id: MatchId, poll_type: PollType },
}
