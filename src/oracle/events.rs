//! Events for the Price Oracle

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when the owner assigns the updater
#[odra::event]
pub struct OracleInitialized {
    /// Oracle owner
    pub owner: Address,
    /// Address allowed to push prices
    pub updater: Address,
}

/// Event emitted when the updater pushes a new price
#[odra::event]
pub struct PriceUpdated {
    /// Updater that pushed the price
    pub updater: Address,
    /// New price
    pub price: U256,
    /// Timestamp of update
    pub timestamp: u64,
}
