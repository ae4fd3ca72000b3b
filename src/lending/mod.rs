//! Lending Protocol - collateralized lending pool
//!
//! Lenders deposit the settlement token; borrowers post collateral and borrow
//! up to the LTV ceiling priced by the oracle. Positions that drift above the
//! ceiling after a price move can be liquidated by anyone.

pub mod lending_pool;
pub mod liquidation;
pub mod errors;
pub mod events;


pub use lending_pool::{BorrowerPosition, LendingPool};
pub use liquidation::{LiquidationEngine, RiskParams};
pub use errors::LendingError;
pub use events::*;
