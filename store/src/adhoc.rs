//! Ad-hoc poll registry storage trait.

use crate::StoreError;
use gauss_types::AdhocPollRow;

/// Option rows of ad-hoc polls, keyed by `(match_id, poll_type, option)`.
pub trait AdhocPollStore {
    /// Insert or replace the row for its `(match_id, poll_type, option)` key.
    fn put_adhoc_option(&self, row: &AdhocPollRow) -> Result<(), StoreError>;

    /// Every ad-hoc option row, in registration order.
    fn iter_adhoc_options(&self) -> Result<Vec<AdhocPollRow>, StoreError>;
}
