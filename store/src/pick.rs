//! Match pick storage trait.

use crate::StoreError;
use gauss_types::MatchPick;

/// Published model reasoning, one entry per match.
pub trait PickStore {
    /// Insert or replace the pick for its match.
    fn put_pick(&self, pick: &MatchPick) -> Result<(), StoreError>;

    fn iter_picks(&self) -> Result<Vec<MatchPick>, StoreError>;
}
