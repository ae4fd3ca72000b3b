//! Error types for the Lending Pool

use odra::prelude::*;

/// Errors that can occur in the lending pool
#[odra::odra_error]
pub enum LendingError {
    // Access Control Errors
    /// Caller is not the pool owner
    NotOwner = 100,

    // Borrowing Errors
    /// Requested debt exceeds the LTV ceiling of the collateral
    ExceedsLtv = 101,
    /// Not enough unborrowed liquidity in the pool
    InsufficientLiquidity = 102,
    /// Oracle is not initialized or has no price
    OracleUnavailable = 103,

    // Position Errors
    /// Borrower has no open position
    NoOpenPosition = 104,
    /// Repayment exceeds outstanding debt
    Overpayment = 105,
    /// Position is healthy, cannot liquidate
    PositionHealthy = 106,

    // Deposit/Withdrawal Errors
    /// Withdrawal exceeds the lender's credited deposit
    InsufficientDeposit = 107,

    // General Errors
    /// Zero amount not allowed
    ZeroAmount = 108,
    /// Math overflow occurred
    MathOverflow = 109,
    /// Invalid configuration parameter
    InvalidConfiguration = 110,
}
