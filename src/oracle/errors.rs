//! Error types for the Price Oracle

use odra::prelude::*;

/// Errors that can occur in the price oracle
#[odra::odra_error]
pub enum OracleError {
    /// Caller is not the oracle owner
    NotOwner = 100,
    /// Updater has already been assigned
    AlreadyInitialized = 101,
    /// Caller is not the assigned updater
    NotUpdater = 102,
    /// Oracle has no updater yet
    NotInitialized = 103,
    /// No price has been pushed yet
    PriceNotSet = 104,
}
