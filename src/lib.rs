#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Settlement ledger
pub mod token;
pub mod errors;
pub mod events;
pub mod math;

// Price feed
pub mod oracle;

// Lending Pool modules
pub mod lending;
