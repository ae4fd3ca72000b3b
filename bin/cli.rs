//! CLI tool for deploying the lending pool and seeding its price oracle.

use lending_pool_contracts::lending::LendingPool;
use lending_pool_contracts::math::DEFAULT_MAX_LTV_BPS;
use lending_pool_contracts::oracle::MockOracle;
use lending_pool_contracts::token::SettlementToken;
use odra::casper_types::U256;
use odra::host::{HostEnv, NoArgs};
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the settlement token ledger.
pub struct LedgerDeployScript;

impl DeployScript for LedgerDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_pool_contracts::token::SettlementTokenInitArgs;

        let _token = SettlementToken::load_or_deploy(
            &env,
            SettlementTokenInitArgs {
                name: String::from("Settlement Token"),
                symbol: String::from("STX"),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the price oracle. The deploying account becomes its owner.
pub struct OracleDeployScript;

impl DeployScript for OracleDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        let _oracle = MockOracle::load_or_deploy(&env, NoArgs, container, 200_000_000_000)?;
        Ok(())
    }
}

/// Deploys the lending pool.
/// Requires the ledger and the oracle to be deployed first.
pub struct PoolDeployScript;

impl DeployScript for PoolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_pool_contracts::lending::lending_pool::LendingPoolInitArgs;

        let oracle = container.contract_ref::<MockOracle>(env)?;
        let token = container.contract_ref::<SettlementToken>(env)?;
        let token_address = token.address().clone();

        let _pool = LendingPool::load_or_deploy(
            &env,
            LendingPoolInitArgs {
                price_oracle_address: oracle.address().clone(),
                settlement_token_address: token_address,
                collateral_token_address: token_address,
                max_ltv_bps: DEFAULT_MAX_LTV_BPS,
            },
            container,
            500_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys ledger, oracle and pool in order.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        LedgerDeployScript.deploy(env, container)?;
        OracleDeployScript.deploy(env, container)?;
        PoolDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Scenario assigning the oracle updater (owner only, once).
pub struct InitializeOracleScenario;

impl Scenario for InitializeOracleScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "updater",
            "Address allowed to push prices",
            NamedCLType::Key,
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut oracle = container.contract_ref::<MockOracle>(env)?;
        let updater = args.get_single::<Address>("updater")?;

        env.set_gas(50_000_000_000);
        oracle.try_initialize(updater)?;

        println!("Oracle updater assigned");
        Ok(())
    }
}

impl ScenarioMetadata for InitializeOracleScenario {
    const NAME: &'static str = "initialize-oracle";
    const DESCRIPTION: &'static str = "Assigns the account allowed to push oracle prices";
}

/// Scenario pushing a new oracle price (updater only).
pub struct UpdatePriceScenario;

impl Scenario for UpdatePriceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "price",
            "Value of one collateral unit in settlement units",
            NamedCLType::U256,
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut oracle = container.contract_ref::<MockOracle>(env)?;
        let price = args.get_single::<U256>("price")?;

        env.set_gas(50_000_000_000);
        oracle.try_update_price(price)?;

        println!("Oracle price set to {}", price);
        Ok(())
    }
}

impl ScenarioMetadata for UpdatePriceScenario {
    const NAME: &'static str = "update-price";
    const DESCRIPTION: &'static str = "Pushes a new price to the oracle";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the collateralized lending pool contracts")
        // Deploy scripts
        .deploy(LedgerDeployScript)
        .deploy(OracleDeployScript)
        .deploy(PoolDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<SettlementToken>()
        .contract::<MockOracle>()
        .contract::<LendingPool>()
        // Scenarios
        .scenario(InitializeOracleScenario)
        .scenario(UpdatePriceScenario)
        .build()
        .run();
}
