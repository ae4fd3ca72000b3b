//! Lending Pool - Main contract for deposits, borrows, repayments and liquidations
//!
//! Core lending contract that coordinates:
//! - Settlement token deposits and withdrawals by lenders
//! - Borrowing against collateral, capped by the LTV ceiling
//! - Repayments
//! - Liquidations
//!
//! Every entry point validates all preconditions before it moves funds or
//! touches bookkeeping, so a failed call leaves the pool unchanged.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::LendingError;
use super::events::*;
use super::liquidation::{LiquidationEngine, RiskParams};
use crate::math::{RiskMath, SafeMath};
use crate::oracle::MockOracleContractRef;
use crate::token::Cep18TokenContractRef;

/// Borrower's loan position
#[odra::odra_type]
pub struct BorrowerPosition {
    /// Collateral held in pool custody
    pub collateral_amount: U256,
    /// Outstanding debt
    pub borrowed_amount: U256,
    /// False once fully repaid or liquidated
    pub open: bool,
}

impl BorrowerPosition {
    fn closed() -> Self {
        Self {
            collateral_amount: U256::zero(),
            borrowed_amount: U256::zero(),
            open: false,
        }
    }
}

/// Lending Pool contract
#[odra::module]
pub struct LendingPool {
    /// Price oracle address
    price_oracle: Var<Address>,
    /// Token lent out and repaid
    settlement_token: Var<Address>,
    /// Token posted as collateral (may equal the settlement token)
    collateral_token: Var<Address>,
    /// Risk configuration
    risk_params: Var<RiskParams>,
    /// Lender deposits
    lender_deposits: Mapping<Address, U256>,
    /// Borrower positions
    positions: Mapping<Address, BorrowerPosition>,
    /// Deposits not currently lent out
    total_liquidity: Var<U256>,
    /// Outstanding borrowed principal
    total_borrowed: Var<U256>,
    /// Collateral in pool custody
    total_collateral: Var<U256>,
    /// Sum of all lender deposits
    total_deposits: Var<U256>,
    /// Owner address
    owner: Var<Address>,
}

#[odra::module]
impl LendingPool {
    /// Initialize the lending pool
    ///
    /// # Arguments
    /// * `price_oracle_address` - Oracle used for collateral valuation
    /// * `settlement_token_address` - CEP-18 token deposited, lent and repaid
    /// * `collateral_token_address` - CEP-18 token posted as collateral
    /// * `max_ltv_bps` - LTV ceiling in basis points (8000 = 80%)
    pub fn init(
        &mut self,
        price_oracle_address: Address,
        settlement_token_address: Address,
        collateral_token_address: Address,
        max_ltv_bps: u32,
    ) {
        let params = RiskParams::with_max_ltv(max_ltv_bps);
        self.checked(params.validate());

        self.price_oracle.set(price_oracle_address);
        self.settlement_token.set(settlement_token_address);
        self.collateral_token.set(collateral_token_address);
        self.risk_params.set(params);

        self.total_liquidity.set(U256::zero());
        self.total_borrowed.set(U256::zero());
        self.total_collateral.set(U256::zero());
        self.total_deposits.set(U256::zero());

        self.owner.set(self.env().caller());
    }

    // ========================================
    // Deposit/Withdrawal
    // ========================================

    /// Deposit settlement tokens; the pool must be approved for `amount`
    pub fn deposit_stx(&mut self, amount: U256) -> bool {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let lender = self.env().caller();

        let balance = self.checked(SafeMath::add(self.get_lender_deposit(lender), amount));
        let liquidity = self.checked(SafeMath::add(self.get_total_liquidity(), amount));
        let deposits = self.checked(SafeMath::add(self.get_total_deposits(), amount));

        let token = self.settlement_token_address();
        self.pull(token, lender, amount);

        self.lender_deposits.set(&lender, balance);
        self.total_liquidity.set(liquidity);
        self.total_deposits.set(deposits);

        self.env().emit_event(Deposited {
            lender,
            amount,
            balance,
            timestamp: self.env().get_block_time(),
        });
        true
    }

    /// Withdraw previously deposited settlement tokens
    pub fn withdraw_stx(&mut self, amount: U256) -> bool {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let lender = self.env().caller();

        let deposited = self.get_lender_deposit(lender);
        if amount > deposited {
            self.env().revert(LendingError::InsufficientDeposit);
        }
        let liquidity = self.get_total_liquidity();
        if amount > liquidity {
            self.env().revert(LendingError::InsufficientLiquidity);
        }

        let balance = deposited - amount;
        self.lender_deposits.set(&lender, balance);
        self.total_liquidity.set(liquidity - amount);
        let deposits = self.checked(SafeMath::sub(self.get_total_deposits(), amount));
        self.total_deposits.set(deposits);

        let token = self.settlement_token_address();
        self.push(token, lender, amount);

        self.env().emit_event(Withdrawn {
            lender,
            amount,
            balance,
            timestamp: self.env().get_block_time(),
        });
        true
    }

    // ========================================
    // Borrowing
    // ========================================

    /// Post `collateral_amount` and borrow `borrow_amount` against it
    ///
    /// An open position is topped up: the LTV check covers its total
    /// collateral and total debt after this call.
    pub fn borrow_stx(&mut self, collateral_amount: U256, borrow_amount: U256) -> bool {
        if borrow_amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let borrower = self.env().caller();
        let price = self.read_price();

        let position = self.open_position(borrower).unwrap_or_else(BorrowerPosition::closed);
        let new_collateral = self.checked(SafeMath::add(position.collateral_amount, collateral_amount));
        let new_debt = self.checked(SafeMath::add(position.borrowed_amount, borrow_amount));

        let params = self.get_risk_params();
        let within_ltv = self.checked(RiskMath::is_within_ltv(
            new_collateral,
            new_debt,
            price,
            params.max_ltv_bps,
        ));
        if !within_ltv {
            self.env().revert(LendingError::ExceedsLtv);
        }

        let liquidity = self.get_total_liquidity();
        if borrow_amount > liquidity {
            self.env().revert(LendingError::InsufficientLiquidity);
        }
        let total_borrowed = self.checked(SafeMath::add(self.get_total_borrowed(), borrow_amount));
        let total_collateral = self.checked(SafeMath::add(self.get_total_collateral(), collateral_amount));

        let collateral_token = self.collateral_token_address();
        self.pull(collateral_token, borrower, collateral_amount);
        let settlement_token = self.settlement_token_address();
        self.push(settlement_token, borrower, borrow_amount);

        self.positions.set(&borrower, BorrowerPosition {
            collateral_amount: new_collateral,
            borrowed_amount: new_debt,
            open: true,
        });
        self.total_liquidity.set(liquidity - borrow_amount);
        self.total_borrowed.set(total_borrowed);
        self.total_collateral.set(total_collateral);

        self.env().emit_event(Borrowed {
            borrower,
            collateral_amount,
            amount: borrow_amount,
            price,
            timestamp: self.env().get_block_time(),
        });
        true
    }

    /// Repay debt; full repayment releases the collateral and closes the position
    pub fn repay_stx(&mut self, amount: U256) -> bool {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let borrower = self.env().caller();
        let position = self
            .open_position(borrower)
            .unwrap_or_revert_with(&self.env(), LendingError::NoOpenPosition);

        if amount > position.borrowed_amount {
            self.env().revert(LendingError::Overpayment);
        }
        let remaining_debt = position.borrowed_amount - amount;
        let total_borrowed = self.checked(SafeMath::sub(self.get_total_borrowed(), amount));
        let liquidity = self.checked(SafeMath::add(self.get_total_liquidity(), amount));

        let settlement_token = self.settlement_token_address();
        self.pull(settlement_token, borrower, amount);

        self.total_borrowed.set(total_borrowed);
        self.total_liquidity.set(liquidity);

        if remaining_debt.is_zero() {
            self.close_position(borrower, position.collateral_amount);
        } else {
            self.positions.set(&borrower, BorrowerPosition {
                borrowed_amount: remaining_debt,
                ..position
            });
        }

        self.env().emit_event(Repaid {
            borrower,
            amount,
            remaining_debt,
            timestamp: self.env().get_block_time(),
        });
        true
    }

    // ========================================
    // Liquidation
    // ========================================

    /// Liquidate an undercollateralized position
    ///
    /// The oracle is read once; the same price drives the health check and
    /// the settlement amounts.
    pub fn liquidate(&mut self, borrower: Address) -> bool {
        let liquidator = self.env().caller();
        let position = self
            .open_position(borrower)
            .unwrap_or_revert_with(&self.env(), LendingError::NoOpenPosition);

        let price = self.read_price();
        let params = self.get_risk_params();

        let healthy = self.checked(RiskMath::is_within_ltv(
            position.collateral_amount,
            position.borrowed_amount,
            price,
            params.max_ltv_bps,
        ));
        if healthy {
            self.env().revert(LendingError::PositionHealthy);
        }

        let amounts = self.checked(LiquidationEngine::calculate_liquidation_amounts(
            position.borrowed_amount,
            position.collateral_amount,
            price,
            &params,
        ));
        let remaining_debt = position.borrowed_amount - amounts.debt_covered;
        let remaining_collateral = position.collateral_amount - amounts.collateral_seized;
        let total_borrowed = self.checked(SafeMath::sub(self.get_total_borrowed(), amounts.debt_covered));
        let liquidity = self.checked(SafeMath::add(self.get_total_liquidity(), amounts.debt_covered));
        let total_collateral = self.checked(SafeMath::sub(self.get_total_collateral(), amounts.collateral_seized));

        let settlement_token = self.settlement_token_address();
        self.pull(settlement_token, liquidator, amounts.debt_covered);
        let collateral_token = self.collateral_token_address();
        self.push(collateral_token, liquidator, amounts.collateral_seized);

        self.total_borrowed.set(total_borrowed);
        self.total_liquidity.set(liquidity);
        self.total_collateral.set(total_collateral);

        if remaining_debt.is_zero() {
            self.close_position(borrower, remaining_collateral);
        } else {
            self.positions.set(&borrower, BorrowerPosition {
                collateral_amount: remaining_collateral,
                borrowed_amount: remaining_debt,
                open: true,
            });
        }

        self.env().emit_event(Liquidated {
            borrower,
            liquidator,
            debt_covered: amounts.debt_covered,
            collateral_seized: amounts.collateral_seized,
            price,
            timestamp: self.env().get_block_time(),
        });
        true
    }

    // ========================================
    // View Functions
    // ========================================

    pub fn get_lender_deposit(&self, lender: Address) -> U256 {
        self.lender_deposits.get(&lender).unwrap_or_default()
    }

    pub fn get_position(&self, borrower: Address) -> Option<BorrowerPosition> {
        self.positions.get(&borrower)
    }

    pub fn get_total_liquidity(&self) -> U256 {
        self.total_liquidity.get_or_default()
    }

    pub fn get_total_borrowed(&self) -> U256 {
        self.total_borrowed.get_or_default()
    }

    pub fn get_total_collateral(&self) -> U256 {
        self.total_collateral.get_or_default()
    }

    pub fn get_total_deposits(&self) -> U256 {
        self.total_deposits.get_or_default()
    }

    pub fn get_risk_params(&self) -> RiskParams {
        self.risk_params.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(LendingError::NotOwner)
    }

    pub fn get_oracle(&self) -> Address {
        self.price_oracle.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    /// Largest loan `collateral_amount` supports at the current oracle price
    pub fn max_borrow_for(&self, collateral_amount: U256) -> U256 {
        let price = self.read_price();
        let params = self.get_risk_params();
        self.checked(RiskMath::max_borrow(collateral_amount, price, params.max_ltv_bps))
    }

    /// Whether `borrower` has an open position that `liquidate` would accept
    pub fn is_liquidatable(&self, borrower: Address) -> bool {
        let Some(position) = self.open_position(borrower) else {
            return false;
        };
        let Some(price) = self.oracle().latest_price() else {
            return false;
        };
        let params = self.get_risk_params();
        !self.checked(RiskMath::is_within_ltv(
            position.collateral_amount,
            position.borrowed_amount,
            price,
            params.max_ltv_bps,
        ))
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn set_risk_params(
        &mut self,
        max_ltv_bps: u32,
        liquidation_bonus_bps: u32,
        close_factor_bps: u32,
    ) {
        let owner = self.only_owner();

        let params = RiskParams {
            max_ltv_bps,
            liquidation_bonus_bps,
            close_factor_bps,
        };
        self.checked(params.validate());
        self.risk_params.set(params);

        self.env().emit_event(RiskParamsUpdated {
            max_ltv_bps,
            liquidation_bonus_bps,
            close_factor_bps,
            updated_by: owner,
        });
    }

    // ========================================
    // Internal
    // ========================================

    fn open_position(&self, borrower: Address) -> Option<BorrowerPosition> {
        self.positions.get(&borrower).filter(|position| position.open)
    }

    /// Release `collateral_amount` to the borrower and mark the position closed
    fn close_position(&mut self, borrower: Address, collateral_amount: U256) {
        let total_collateral = self.checked(SafeMath::sub(self.get_total_collateral(), collateral_amount));
        let collateral_token = self.collateral_token_address();
        self.push(collateral_token, borrower, collateral_amount);

        self.total_collateral.set(total_collateral);
        self.positions.set(&borrower, BorrowerPosition::closed());

        self.env().emit_event(PositionClosed {
            borrower,
            collateral_returned: collateral_amount,
            timestamp: self.env().get_block_time(),
        });
    }

    fn oracle(&self) -> MockOracleContractRef {
        MockOracleContractRef::new(self.env(), self.get_oracle())
    }

    fn read_price(&self) -> U256 {
        self.oracle()
            .latest_price()
            .unwrap_or_revert_with(&self.env(), LendingError::OracleUnavailable)
    }

    fn settlement_token_address(&self) -> Address {
        self.settlement_token.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    fn collateral_token_address(&self) -> Address {
        self.collateral_token.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    /// Move `amount` of `token` from `from` into pool custody
    fn pull(&self, token: Address, from: Address, amount: U256) {
        if amount.is_zero() {
            return;
        }
        let mut token = Cep18TokenContractRef::new(self.env(), token);
        token.transfer_from(from, Address::from(self.env().self_address()), amount);
    }

    /// Move `amount` of `token` out of pool custody to `to`
    fn push(&self, token: Address, to: Address, amount: U256) {
        if amount.is_zero() {
            return;
        }
        let mut token = Cep18TokenContractRef::new(self.env(), token);
        token.transfer(to, amount);
    }

    fn only_owner(&self) -> Address {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(LendingError::NotOwner);
        if caller != owner {
            self.env().revert(LendingError::NotOwner);
        }
        owner
    }
}

impl LendingPool {
    /// Unwrap a math result or revert the call with its error
    fn checked<T>(&self, result: Result<T, LendingError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }
}
