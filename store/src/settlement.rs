//! Settlement storage trait.

use crate::StoreError;
use gauss_types::SettlementRecord;

/// Scored outcomes produced by the out-of-band settlement process.
pub trait SettlementStore {
    fn put_settlement(&self, record: &SettlementRecord) -> Result<(), StoreError>;

    fn iter_settlements(&self) -> Result<Vec<SettlementRecord>, StoreError>;
}
