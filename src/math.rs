//! Fixed-point utilities for the lending pool
//! Basis-point ratios on U256 with floor rounding
use odra::casper_types::U256;
use crate::lending::errors::LendingError;

/// Basis points in one whole (100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Default loan-to-value ceiling (80%)
pub const DEFAULT_MAX_LTV_BPS: u32 = 8_000;

/// Default liquidation bonus paid to liquidators (5%)
pub const DEFAULT_LIQUIDATION_BONUS_BPS: u32 = 500;

/// Default share of debt covered per liquidation (100%)
pub const DEFAULT_CLOSE_FACTOR_BPS: u32 = 10_000;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_add(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_sub(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_mul(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, LendingError> {
        if b.is_zero() {
            return Err(LendingError::MathOverflow);
        }
        Ok(a / b)
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }

    /// `value * bps / 10_000`, rounded down
    pub fn apply_bps(value: U256, bps: u32) -> Result<U256, LendingError> {
        let scaled = Self::mul(value, U256::from(bps))?;
        Self::div(scaled, U256::from(BPS_DENOMINATOR))
    }
}

/// Collateral valuation and LTV checks
pub struct RiskMath;

impl RiskMath {
    /// Value of `collateral_amount` at the oracle `price`
    pub fn collateral_value(collateral_amount: U256, price: U256) -> Result<U256, LendingError> {
        SafeMath::mul(collateral_amount, price)
    }

    /// Largest debt the collateral supports at `max_ltv_bps`
    ///
    /// max_borrow = collateral_amount * price * max_ltv_bps / 10_000 (floor)
    pub fn max_borrow(
        collateral_amount: U256,
        price: U256,
        max_ltv_bps: u32,
    ) -> Result<U256, LendingError> {
        let value = Self::collateral_value(collateral_amount, price)?;
        SafeMath::apply_bps(value, max_ltv_bps)
    }

    /// A debt exactly at the ceiling is still within it.
    pub fn is_within_ltv(
        collateral_amount: U256,
        borrowed_amount: U256,
        price: U256,
        max_ltv_bps: u32,
    ) -> Result<bool, LendingError> {
        let ceiling = Self::max_borrow(collateral_amount, price, max_ltv_bps)?;
        Ok(borrowed_amount <= ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bps_rounds_down() {
        assert_eq!(SafeMath::apply_bps(U256::from(10), 8_000).unwrap(), U256::from(8));
        assert_eq!(SafeMath::apply_bps(U256::from(9), 5_000).unwrap(), U256::from(4));
        assert_eq!(SafeMath::apply_bps(U256::from(1), 9_999).unwrap(), U256::zero());
        assert_eq!(SafeMath::apply_bps(U256::from(123), BPS_DENOMINATOR).unwrap(), U256::from(123));
    }

    #[test]
    fn test_max_borrow_at_price_ten() {
        // 1 unit of collateral at price 10 is worth 10, 80% of that is 8
        let max = RiskMath::max_borrow(U256::one(), U256::from(10), DEFAULT_MAX_LTV_BPS).unwrap();
        assert_eq!(max, U256::from(8));
    }

    #[test]
    fn test_ltv_boundary_is_inclusive() {
        let one = U256::one();
        let price = U256::from(10);
        assert!(RiskMath::is_within_ltv(one, U256::from(7), price, DEFAULT_MAX_LTV_BPS).unwrap());
        assert!(RiskMath::is_within_ltv(one, U256::from(8), price, DEFAULT_MAX_LTV_BPS).unwrap());
        assert!(!RiskMath::is_within_ltv(one, U256::from(9), price, DEFAULT_MAX_LTV_BPS).unwrap());
        assert!(!RiskMath::is_within_ltv(one, U256::from(10), price, DEFAULT_MAX_LTV_BPS).unwrap());
    }

    #[test]
    fn test_zero_price_supports_no_debt() {
        let collateral = U256::from(1_000);
        assert!(RiskMath::is_within_ltv(collateral, U256::zero(), U256::zero(), DEFAULT_MAX_LTV_BPS).unwrap());
        assert!(!RiskMath::is_within_ltv(collateral, U256::one(), U256::zero(), DEFAULT_MAX_LTV_BPS).unwrap());
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(
            RiskMath::collateral_value(U256::MAX, U256::from(2)),
            Err(LendingError::MathOverflow)
        ));
        assert!(matches!(SafeMath::sub(U256::zero(), U256::one()), Err(LendingError::MathOverflow)));
        assert!(matches!(SafeMath::div(U256::one(), U256::zero()), Err(LendingError::MathOverflow)));
    }
}
