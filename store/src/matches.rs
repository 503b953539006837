//! Match registry storage trait.

use crate::StoreError;
use gauss_types::{MatchId, MatchRecord};

/// Scheduled matches and their regular-poll closing times.
pub trait MatchStore {
    /// Insert or replace a match.
    fn put_match(&self, record: &MatchRecord) -> Result<(), StoreError>;

    fn get_match(&self, match_id: &MatchId) -> Result<MatchRecord, StoreError>;

    /// Every registered match, in no particular order.
    fn iter_matches(&self) -> Result<Vec<MatchRecord>, StoreError>;
}
