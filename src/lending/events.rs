//! Events for the Lending Pool

use odra::prelude::*;
use odra::casper_types::U256;

// ============================================================================
// Deposit/Withdrawal Events
// ============================================================================

/// Event emitted when a lender deposits settlement tokens
#[odra::event]
pub struct Deposited {
    /// Lender address
    pub lender: Address,
    /// Amount deposited
    pub amount: U256,
    /// Lender's credited balance after the deposit
    pub balance: U256,
    /// Timestamp of deposit
    pub timestamp: u64,
}

/// Event emitted when a lender withdraws settlement tokens
#[odra::event]
pub struct Withdrawn {
    /// Lender address
    pub lender: Address,
    /// Amount withdrawn
    pub amount: U256,
    /// Lender's credited balance after the withdrawal
    pub balance: U256,
    /// Timestamp of withdrawal
    pub timestamp: u64,
}

// ============================================================================
// Borrowing Events
// ============================================================================

/// Event emitted when a loan is issued
#[odra::event]
pub struct Borrowed {
    /// Borrower address
    pub borrower: Address,
    /// Collateral posted with this call
    pub collateral_amount: U256,
    /// Amount lent out with this call
    pub amount: U256,
    /// Oracle price used for the LTV check
    pub price: U256,
    /// Timestamp of borrow
    pub timestamp: u64,
}

/// Event emitted when debt is repaid
#[odra::event]
pub struct Repaid {
    /// Borrower address
    pub borrower: Address,
    /// Amount repaid
    pub amount: U256,
    /// Debt left after the repayment
    pub remaining_debt: U256,
    /// Timestamp of repayment
    pub timestamp: u64,
}

/// Event emitted when a position is closed and its leftover collateral released
#[odra::event]
pub struct PositionClosed {
    /// Borrower address
    pub borrower: Address,
    /// Collateral returned to the borrower
    pub collateral_returned: U256,
    /// Timestamp of closing
    pub timestamp: u64,
}

// ============================================================================
// Liquidation Events
// ============================================================================

/// Event emitted when a position is liquidated
#[odra::event]
pub struct Liquidated {
    /// Address of the borrower being liquidated
    pub borrower: Address,
    /// Address of the liquidator
    pub liquidator: Address,
    /// Amount of debt repaid by the liquidator
    pub debt_covered: U256,
    /// Amount of collateral seized
    pub collateral_seized: U256,
    /// Oracle price used for both health check and settlement
    pub price: U256,
    /// Timestamp of liquidation
    pub timestamp: u64,
}

// ============================================================================
// Configuration Events
// ============================================================================

/// Event emitted when risk parameters are updated
#[odra::event]
pub struct RiskParamsUpdated {
    /// New LTV ceiling in basis points
    pub max_ltv_bps: u32,
    /// New liquidation bonus in basis points
    pub liquidation_bonus_bps: u32,
    /// New close factor in basis points
    pub close_factor_bps: u32,
    /// Updated by
    pub updated_by: Address,
}
