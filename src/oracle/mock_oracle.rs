//! Mock Oracle - single price feed with a two-phase setup
//!
//! 1. The owner (deployer) assigns an updater once via `initialize`.
//! 2. The updater pushes prices via `update_price` as often as needed.
//!
//! The oracle does not refresh or expire prices; freshness is up to readers.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::OracleError;
use super::events::*;

/// Price Oracle contract
#[odra::module]
pub struct MockOracle {
    /// Deployer, the only address allowed to assign the updater
    owner: Var<Address>,
    /// Address allowed to push prices
    updater: Var<Address>,
    /// Latest pushed price
    price: Var<U256>,
    /// Block time of the latest price push
    last_updated: Var<u64>,
    /// Set once the updater has been assigned
    initialized: Var<bool>,
}

#[odra::module]
impl MockOracle {
    /// Record the deployer as owner
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.owner.set(caller);
        self.initialized.set(false);
    }

    /// Assign the updater (owner only, exactly once)
    ///
    /// Once initialized every further call fails with `AlreadyInitialized`,
    /// whoever the caller is.
    pub fn initialize(&mut self, new_updater: Address) -> bool {
        if self.initialized.get_or_default() {
            self.env().revert(OracleError::AlreadyInitialized);
        }
        let owner = self.only_owner();

        self.updater.set(new_updater);
        self.initialized.set(true);

        self.env().emit_event(OracleInitialized {
            owner,
            updater: new_updater,
        });
        true
    }

    /// Overwrite the price (updater only)
    pub fn update_price(&mut self, new_price: U256) -> bool {
        if !self.initialized.get_or_default() {
            self.env().revert(OracleError::NotInitialized);
        }
        let caller = self.env().caller();
        let updater = self.updater.get_or_revert_with(OracleError::NotInitialized);
        if caller != updater {
            self.env().revert(OracleError::NotUpdater);
        }

        let timestamp = self.env().get_block_time();
        self.price.set(new_price);
        self.last_updated.set(timestamp);

        self.env().emit_event(PriceUpdated {
            updater,
            price: new_price,
            timestamp,
        });
        true
    }

    /// Get the current price
    pub fn get_price(&self) -> U256 {
        if !self.initialized.get_or_default() {
            self.env().revert(OracleError::NotInitialized);
        }
        self.price.get_or_revert_with(OracleError::PriceNotSet)
    }

    /// Price if the oracle is initialized and has been fed, without reverting
    pub fn latest_price(&self) -> Option<U256> {
        if !self.initialized.get_or_default() {
            return None;
        }
        self.price.get()
    }

    pub fn get_updater(&self) -> Option<Address> {
        self.updater.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get_or_default()
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(OracleError::NotOwner)
    }

    /// Block time of the latest price push (0 if never pushed)
    pub fn get_last_updated(&self) -> u64 {
        self.last_updated.get_or_default()
    }

    fn only_owner(&self) -> Address {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(OracleError::NotOwner);
        if caller != owner {
            self.env().revert(OracleError::NotOwner);
        }
        owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv, NoArgs};

    fn setup() -> (HostEnv, MockOracleHostRef) {
        let env = odra_test::env();
        env.set_caller(env.get_account(0));
        let oracle = MockOracle::deploy(&env, NoArgs);
        (env, oracle)
    }

    #[test]
    fn test_initialize_sets_updater() {
        let (env, mut oracle) = setup();
        let updater = env.get_account(1);

        assert!(oracle.initialize(updater));
        assert_eq!(oracle.get_updater(), Some(updater));
        assert!(oracle.is_initialized());
        assert_eq!(oracle.get_owner(), env.get_account(0));
        assert!(env.emitted(&oracle, "OracleInitialized"));
    }

    #[test]
    fn test_non_owner_cannot_initialize() {
        let (env, mut oracle) = setup();
        let updater = env.get_account(1);

        env.set_caller(env.get_account(2));
        assert_eq!(oracle.try_initialize(updater), Err(OracleError::NotOwner.into()));
        assert!(!oracle.is_initialized());
        assert_eq!(oracle.get_updater(), None);
    }

    #[test]
    fn test_initialize_only_once() {
        let (env, mut oracle) = setup();
        let updater = env.get_account(1);
        oracle.initialize(updater);

        assert_eq!(
            oracle.try_initialize(env.get_account(3)),
            Err(OracleError::AlreadyInitialized.into())
        );

        env.set_caller(env.get_account(2));
        assert_eq!(
            oracle.try_initialize(env.get_account(2)),
            Err(OracleError::AlreadyInitialized.into())
        );
        assert_eq!(oracle.get_updater(), Some(updater));
    }

    #[test]
    fn test_updater_can_update_price() {
        let (env, mut oracle) = setup();
        let updater = env.get_account(1);
        oracle.initialize(updater);

        env.set_caller(updater);
        assert!(oracle.update_price(U256::from(50_000)));
        assert_eq!(oracle.get_price(), U256::from(50_000));
        assert_eq!(oracle.latest_price(), Some(U256::from(50_000)));
        assert!(env.emitted(&oracle, "PriceUpdated"));

        oracle.update_price(U256::from(42));
        assert_eq!(oracle.get_price(), U256::from(42));
    }

    #[test]
    fn test_non_updater_cannot_update_price() {
        let (env, mut oracle) = setup();
        let updater = env.get_account(1);
        oracle.initialize(updater);
        env.set_caller(updater);
        oracle.update_price(U256::from(10));

        // the owner is not the updater either
        env.set_caller(env.get_account(0));
        assert_eq!(
            oracle.try_update_price(U256::from(50_000)),
            Err(OracleError::NotUpdater.into())
        );
        env.set_caller(env.get_account(2));
        assert_eq!(
            oracle.try_update_price(U256::from(50_000)),
            Err(OracleError::NotUpdater.into())
        );
        assert_eq!(oracle.get_price(), U256::from(10));
    }

    #[test]
    fn test_update_before_initialize_fails() {
        let (env, mut oracle) = setup();

        env.set_caller(env.get_account(1));
        assert_eq!(
            oracle.try_update_price(U256::from(50_000)),
            Err(OracleError::NotInitialized.into())
        );
        assert_eq!(oracle.try_get_price(), Err(OracleError::NotInitialized.into()));
        assert_eq!(oracle.latest_price(), None);
    }

    #[test]
    fn test_price_unset_after_initialize() {
        let (env, mut oracle) = setup();
        oracle.initialize(env.get_account(1));

        assert_eq!(oracle.try_get_price(), Err(OracleError::PriceNotSet.into()));
        assert_eq!(oracle.latest_price(), None);
        assert_eq!(oracle.get_last_updated(), 0);
    }

    #[test]
    fn test_initialized_flag_flips_once() {
        let (env, mut oracle) = setup();
        assert!(!oracle.is_initialized());
        assert!(!oracle.is_initialized());

        oracle.initialize(env.get_account(1));
        assert!(oracle.is_initialized());
        assert!(oracle.is_initialized());
    }

    #[test]
    fn test_last_updated_tracks_block_time() {
        let (env, mut oracle) = setup();
        let updater = env.get_account(1);
        oracle.initialize(updater);

        env.advance_block_time(5_000);
        env.set_caller(updater);
        oracle.update_price(U256::from(7));
        assert!(oracle.get_last_updated() >= 5_000);
    }
}
