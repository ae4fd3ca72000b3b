//! Build entry for the oracle, ledger and pool WASM contracts.
#![doc = "Build entry for the oracle, ledger and pool WASM contracts."]

#[allow(unused_imports)]
use lending_pool_contracts;

fn main() {
    // odra-build drives the WASM compilation; nothing to do at runtime
}
