//! CEP-18 compatible settlement token
//! This module provides the ledger the lending pool moves funds through
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Settlement token implementing the CEP-18 standard
#[odra::module]
pub struct SettlementToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Address allowed to mint (faucet)
    minter: Var<Address>,
}

#[odra::module]
impl SettlementToken {
    /// Initialize the token; the deployer becomes the minter
    pub fn init(&mut self, name: String, symbol: String) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(6);
        self.total_supply.set(U256::zero());
        self.minter.set(self.env().caller());
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens (minter only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        let caller = self.env().caller();
        let minter = self.minter.get_or_revert_with(TokenError::NotMinter);
        if caller != minter {
            self.env().revert(TokenError::NotMinter);
        }

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
    }

    /// Get the minter address
    pub fn minter(&self) -> Address {
        self.minter.get_or_revert_with(TokenError::NotMinter)
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

/// External interface the pool uses to move CEP-18 funds
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, SettlementTokenHostRef) {
        let env = odra_test::env();
        let init_args = SettlementTokenInitArgs {
            name: String::from("Settlement Token"),
            symbol: String::from("STX"),
        };
        let token = SettlementToken::deploy(&env, init_args);
        (env, token)
    }

    #[test]
    fn test_init() {
        let (env, token) = setup();
        assert_eq!(token.name(), "Settlement Token");
        assert_eq!(token.symbol(), "STX");
        assert_eq!(token.decimals(), 6);
        assert_eq!(token.total_supply(), U256::zero());
        assert_eq!(token.minter(), env.get_account(0));
    }

    #[test]
    fn test_mint_and_transfer() {
        let (env, mut token) = setup();
        let user1 = env.get_account(1);
        let user2 = env.get_account(2);

        token.mint(user1, U256::from(1000));

        env.set_caller(user1);
        token.transfer(user2, U256::from(400));

        assert_eq!(token.balance_of(user1), U256::from(600));
        assert_eq!(token.balance_of(user2), U256::from(400));
        assert_eq!(token.total_supply(), U256::from(1000));
    }

    #[test]
    fn test_only_minter_can_mint() {
        let (env, mut token) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            token.try_mint(user, U256::from(1)),
            Err(TokenError::NotMinter.into())
        );
        assert_eq!(token.balance_of(user), U256::zero());
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let (env, mut token) = setup();
        let owner = env.get_account(1);
        let spender = env.get_account(2);
        let recipient = env.get_account(3);
        token.mint(owner, U256::from(500));

        env.set_caller(spender);
        assert_eq!(
            token.try_transfer_from(owner, recipient, U256::from(100)),
            Err(TokenError::InsufficientAllowance.into())
        );

        env.set_caller(owner);
        token.approve(spender, U256::from(100));

        env.set_caller(spender);
        token.transfer_from(owner, recipient, U256::from(100));
        assert_eq!(token.balance_of(recipient), U256::from(100));
        assert_eq!(token.allowance(owner, spender), U256::zero());
    }

    #[test]
    fn test_transfer_beyond_balance_fails() {
        let (env, mut token) = setup();
        let user = env.get_account(1);
        token.mint(user, U256::from(10));

        env.set_caller(user);
        assert_eq!(
            token.try_transfer(env.get_account(2), U256::from(11)),
            Err(TokenError::InsufficientBalance.into())
        );
        assert_eq!(token.balance_of(user), U256::from(10));
    }
}
