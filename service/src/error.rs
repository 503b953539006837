use gauss_gate::GateError;
use gauss_registry::RegistryError;
use gauss_store::StoreError;
use gauss_types::{MatchId, PollType, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("sign in required")]
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

    #[error("store error: {0}")]
    Upstream(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

impl From<GateError> for ServiceError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthorized => Self::Unauthorized,
            GateError::PollClosed {
                match_id,
                poll_type,
                closed_at,
            } => Self::PollClosed {
                match_id,
                poll_type,
                closed_at,
            },
            GateError::NotFound(e) => Self::NotFound(e),
            GateError::InvalidOption { option, poll_type } => {
                Self::InvalidOption { option, poll_type }
            }
        }
    }
}

impl ServiceError {
    /// Short label for the rejected-votes counter.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::PollClosed { .. } => "closed",
            Self::NotFound(_) => "not_found",
            Self::InvalidOption { .. } => "invalid_option",
            Self::Upstream(_) => "upstream",
            Self::Config(_) => "config",
        }
    }
}
