//! Ballot validation.

use gauss_registry::PollRegistry;
use gauss_types::{MatchId, PollType, Principal, Timestamp, Vote};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::GateError;

/// What a voter submits: one option for one poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub match_id: MatchId,
    pub poll_type: PollType,
    pub option: String,
}

/// Check a ballot at `now` and turn it into the vote row to append.
pub fn admit(
    registry: &PollRegistry,
    ballot: &Ballot,
    principal: Option<&Principal>,
    now: Timestamp,
) -> Result<Vote, GateError> {
    let principal = principal.ok_or(GateError::Unauthorized)?;
    let option = ballot.option.trim();

    let options = registry.options_for(&ballot.match_id, &ballot.poll_type)?;
    if option.is_empty() || !options.iter().any(|o| o == option) {
        warn!(
            match_id = %ballot.match_id,
            poll_type = %ballot.poll_type,
            option,
            "rejected ballot for unknown option"
        );
        return Err(GateError::InvalidOption {
            option: option.to_string(),
            poll_type: ballot.poll_type.clone(),
        });
    }

    let closes_at = registry.option_closing_time(&ballot.match_id, &ballot.poll_type, option)?;
    if now >= closes_at {
        warn!(
            match_id = %ballot.match_id,
            poll_type = %ballot.poll_type,
            %closes_at,
            "rejected ballot for closed poll"
        );
        return Err(GateError::PollClosed {
            match_id: ballot.match_id.clone(),
            poll_type: ballot.poll_type.clone(),
            closed_at: closes_at,
        });
    }

    info!(
        match_id = %ballot.match_id,
        poll_type = %ballot.poll_type,
        voter = %principal.email,
        "ballot admitted"
    );
    Ok(Vote {
        match_id: ballot.match_id.clone(),
        poll_type: ballot.poll_type.clone(),
        option_voted: option.to_string(),
        user_email: principal.email.clone(),
        user_name: Some(principal.display_name().to_string()),
        created_timestamp: now,
    })
}
