//! Storage TTL helpers.
//!
//! Every contract in the suite bumps the same windows, so the constants live
//! here instead of being repeated per module.

use soroban_sdk::{Env, IntoVal, Val};

pub const TTL_THRESHOLD: u32 = 17_280; // ~1 day
pub const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Extends the TTL of the whole instance storage entry.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of a persistent entry. The key must exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
