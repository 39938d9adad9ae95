#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Env};

/// Fired once when the tier table is stored.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub tier_count: u32,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, tier_count: u32) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            tier_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}
