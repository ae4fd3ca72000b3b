//! Error definitions for the settlement ledger
use odra::prelude::*;

/// Custom errors for the settlement token contract
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 200,

    /// Insufficient balance for operation
    InsufficientBalance = 201,

    /// Caller is not allowed to mint
    NotMinter = 202,
}
