//! Closing-time and option-set resolution.

use std::collections::BTreeMap;

use gauss_types::{AdhocPollRow, MatchId, MatchRecord, PollType, Timestamp};
use serde::Serialize;
use tracing::warn;

use crate::error::RegistryError;
use crate::margin::margin_options_for;

/// One option of an ad-hoc poll with its own closing instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdhocOption {
    pub option: String,
    pub poll_close_time: Timestamp,
}

/// An ad-hoc poll: all option rows sharing a `(match_id, poll_type)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdhocPoll {
    pub match_id: MatchId,
    pub poll_type: PollType,
    pub question: Option<String>,
    /// Options in registration order.
    pub options: Vec<AdhocOption>,
}

impl AdhocPoll {
    /// Closing instant shown for the poll as a whole: the latest option close.
    pub fn display_close_time(&self) -> Timestamp {
        self.options
            .iter()
            .map(|o| o.poll_close_time)
            .max()
            .unwrap_or(Timestamp::EPOCH)
    }

    pub fn option(&self, option: &str) -> Option<&AdhocOption> {
        self.options.iter().find(|o| o.option == option)
    }
}

/// Snapshot of every registered poll, built once per request.
#[derive(Clone, Debug, Default)]
pub struct PollRegistry {
    matches: BTreeMap<MatchId, MatchRecord>,
    adhoc: BTreeMap<(MatchId, PollType), AdhocPoll>,
}

impl PollRegistry {
    /// Build a registry from match rows and ad-hoc option rows.
    ///
    /// Ad-hoc rows must carry an ad-hoc poll type; rows naming `winner` or
    /// `victory_margin` would shadow the match's own polls and are skipped.
    pub fn new(
        matches: impl IntoIterator<Item = MatchRecord>,
        adhoc_rows: impl IntoIterator<Item = AdhocPollRow>,
    ) -> Self {
        let matches = matches
            .into_iter()
            .map(|m| (m.match_id.clone(), m))
            .collect();

        let mut adhoc: BTreeMap<(MatchId, PollType), AdhocPoll> = BTreeMap::new();
        for row in adhoc_rows {
            if row.poll_type.is_regular() {
                warn!(
                    match_id = %row.match_id,
                    poll_type = %row.poll_type,
                    "ignoring ad-hoc row with a regular poll type"
                );
                continue;
            }
            let poll = adhoc
                .entry((row.match_id.clone(), row.poll_type.clone()))
                .or_insert_with(|| AdhocPoll {
                    match_id: row.match_id.clone(),
                    poll_type: row.poll_type.clone(),
                    question: None,
                    options: Vec::new(),
                });
            if poll.question.is_none() {
                poll.question = row.question.clone();
            }
            match poll.options.iter_mut().find(|o| o.option == row.option) {
                Some(existing) => existing.poll_close_time = row.poll_close_time,
                None => poll.options.push(AdhocOption {
                    option: row.option,
                    poll_close_time: row.poll_close_time,
                }),
            }
        }

        Self { matches, adhoc }
    }

    pub fn match_record(&self, match_id: &MatchId) -> Option<&MatchRecord> {
        self.matches.get(match_id)
    }

    pub fn adhoc_poll(&self, match_id: &MatchId, poll_type: &PollType) -> Option<&AdhocPoll> {
        self.adhoc.get(&(match_id.clone(), poll_type.clone()))
    }

    /// Closing instant of a poll.
    ///
    /// Regular polls close with their match. For ad-hoc polls, `option` selects that
    /// option's own closing instant; without it (or for an unknown option) the
    /// poll's display closing instant is returned.
    pub fn closing_time_of(
        &self,
        match_id: &MatchId,
        poll_type: &PollType,
        option: Option<&str>,
    ) -> Result<Timestamp, RegistryError> {
        match poll_type {
            PollType::Winner | PollType::VictoryMargin => self
                .matches
                .get(match_id)
                .map(|m| m.poll_close_time)
                .ok_or_else(|| RegistryError::MatchNotFound(match_id.clone())),
            PollType::Adhoc(_) => {
                let poll = self.adhoc_poll(match_id, poll_type).ok_or_else(|| {
                    RegistryError::PollNotFound {
                        match_id: match_id.clone(),
                        poll_type: poll_type.clone(),
                    }
                })?;
                Ok(option
                    .and_then(|o| poll.option(o))
                    .map(|o| o.poll_close_time)
                    .unwrap_or_else(|| poll.display_close_time()))
            }
        }
    }

    /// Closing instant used when checking a specific option vote.
    ///
    /// Unlike [`closing_time_of`](Self::closing_time_of), an ad-hoc option that is
    /// not registered is an error.
    pub fn option_closing_time(
        &self,
        match_id: &MatchId,
        poll_type: &PollType,
        option: &str,
    ) -> Result<Timestamp, RegistryError> {
        match poll_type {
            PollType::Adhoc(_) => self
                .adhoc_poll(match_id, poll_type)
                .and_then(|p| p.option(option))
                .map(|o| o.poll_close_time)
                .ok_or_else(|| RegistryError::PollNotFound {
                    match_id: match_id.clone(),
                    poll_type: poll_type.clone(),
                }),
            _ => self.closing_time_of(match_id, poll_type, None),
        }
    }

    /// Valid options of a poll, in display order.
    pub fn options_for(
        &self,
        match_id: &MatchId,
        poll_type: &PollType,
    ) -> Result<Vec<String>, RegistryError> {
        match poll_type {
            PollType::Winner => self
                .matches
                .get(match_id)
                .map(|m| vec![m.team_1.clone(), m.team_2.clone()])
                .ok_or_else(|| RegistryError::MatchNotFound(match_id.clone())),
            PollType::VictoryMargin => {
                if !self.matches.contains_key(match_id) {
                    return Err(RegistryError::MatchNotFound(match_id.clone()));
                }
                Ok(margin_options_for(match_id)
                    .iter()
                    .map(|t| t.key.to_string())
                    .collect())
            }
            PollType::Adhoc(_) => self
                .adhoc_poll(match_id, poll_type)
                .map(|p| p.options.iter().map(|o| o.option.clone()).collect())
                .ok_or_else(|| RegistryError::PollNotFound {
                    match_id: match_id.clone(),
                    poll_type: poll_type.clone(),
                }),
        }
    }

    /// Whether the poll still accepts votes at `now` (closing instant strictly later).
    pub fn is_open(
        &self,
        match_id: &MatchId,
        poll_type: &PollType,
        now: Timestamp,
    ) -> Result<bool, RegistryError> {
        Ok(self.closing_time_of(match_id, poll_type, None)? > now)
    }

    /// Matches starting at or after `now`, soonest first.
    pub fn upcoming_matches(&self, now: Timestamp) -> Vec<&MatchRecord> {
        let mut upcoming: Vec<&MatchRecord> =
            self.matches.values().filter(|m| m.date >= now).collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.match_id.cmp(&b.match_id)));
        upcoming
    }

    /// All ad-hoc polls ordered by match then poll name.
    pub fn adhoc_polls(&self) -> impl Iterator<Item = &AdhocPoll> {
        self.adhoc.values()
    }

    /// Earliest closing instant strictly after `now`, across every poll and option.
    ///
    /// Callers re-read the ledger at this instant instead of subscribing to pushes.
    pub fn next_closing_after(&self, now: Timestamp) -> Option<Timestamp> {
        let regular = self.matches.values().map(|m| m.poll_close_time);
        let adhoc = self
            .adhoc
            .values()
            .flat_map(|p| p.options.iter().map(|o| o.poll_close_time));
        regular.chain(adhoc).filter(|t| *t > now).min()
    }
}
