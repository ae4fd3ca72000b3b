//! Price Oracle - single-value price feed for collateral valuation
//!
//! The owner assigns an updater exactly once; from then on only the updater
//! can push prices. The lending pool reads the latest price through
//! [`MockOracleContractRef`].

pub mod mock_oracle;
pub mod errors;
pub mod events;

pub use mock_oracle::{MockOracle, MockOracleContractRef};
pub use errors::OracleError;
pub use events::*;
