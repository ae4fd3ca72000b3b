//! Liquidation Engine - settlement math for undercollateralized positions
//!
//! Liquidators repay (a close-factor share of) a borrower's debt and receive
//! collateral worth the repaid amount plus a bonus, capped at what the
//! position holds.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::LendingError;
use crate::math::{
    SafeMath, BPS_DENOMINATOR, DEFAULT_CLOSE_FACTOR_BPS, DEFAULT_LIQUIDATION_BONUS_BPS,
};

/// Pool-wide risk configuration, all values in basis points
#[odra::odra_type]
pub struct RiskParams {
    /// LTV ceiling enforced at origination and used as the health threshold
    /// Example: 80% = 8000
    pub max_ltv_bps: u32,
    /// Extra collateral value paid to liquidators
    /// Example: 5% = 500
    pub liquidation_bonus_bps: u32,
    /// Share of debt covered by one liquidation
    /// Example: 100% = 10000
    pub close_factor_bps: u32,
}

impl RiskParams {
    /// Defaults for everything but the LTV ceiling
    pub fn with_max_ltv(max_ltv_bps: u32) -> Self {
        Self {
            max_ltv_bps,
            liquidation_bonus_bps: DEFAULT_LIQUIDATION_BONUS_BPS,
            close_factor_bps: DEFAULT_CLOSE_FACTOR_BPS,
        }
    }

    pub fn validate(&self) -> Result<(), LendingError> {
        if self.max_ltv_bps == 0 || self.max_ltv_bps > BPS_DENOMINATOR {
            return Err(LendingError::InvalidConfiguration);
        }
        if self.close_factor_bps == 0 || self.close_factor_bps > BPS_DENOMINATOR {
            return Err(LendingError::InvalidConfiguration);
        }
        if self.liquidation_bonus_bps > BPS_DENOMINATOR {
            return Err(LendingError::InvalidConfiguration);
        }
        Ok(())
    }
}

/// Amounts moved by a single liquidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidationAmounts {
    /// Debt the liquidator pays back to the pool
    pub debt_covered: U256,
    /// Collateral handed to the liquidator
    pub collateral_seized: U256,
}

/// Stateless liquidation calculator
pub struct LiquidationEngine;

impl LiquidationEngine {
    /// Calculate liquidation amounts for a position at `price`
    ///
    /// # Arguments
    /// * `borrowed_amount` - Borrower's outstanding debt
    /// * `collateral_amount` - Collateral held by the position
    /// * `price` - Oracle price read once for this liquidation
    /// * `params` - Pool risk parameters
    pub fn calculate_liquidation_amounts(
        borrowed_amount: U256,
        collateral_amount: U256,
        price: U256,
        params: &RiskParams,
    ) -> Result<LiquidationAmounts, LendingError> {
        let mut debt_covered = SafeMath::apply_bps(borrowed_amount, params.close_factor_bps)?;
        if debt_covered.is_zero() {
            debt_covered = borrowed_amount;
        }

        // worthless collateral goes to the liquidator in full
        if price.is_zero() {
            return Ok(LiquidationAmounts {
                debt_covered,
                collateral_seized: collateral_amount,
            });
        }

        // seized = debt_covered * (1 + bonus) / price
        let bonus_multiplier = BPS_DENOMINATOR + params.liquidation_bonus_bps;
        let value_to_seize = SafeMath::apply_bps(debt_covered, bonus_multiplier)?;
        let units_to_seize = SafeMath::div(value_to_seize, price)?;

        Ok(LiquidationAmounts {
            debt_covered,
            collateral_seized: SafeMath::min(units_to_seize, collateral_amount),
        })
    }
}
