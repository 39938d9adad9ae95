//! Per-account persistent storage: balances, allowances, pre-activation
//! whitelist and lock classification.

use common::{ttl, LockClass};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// Per-account persistent storage uses tuple keys: (prefix, address[, address])
const BALANCE: Symbol = symbol_short!("BAL");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");
const WHITELIST: Symbol = symbol_short!("WL");
const LOCK_CLASS: Symbol = symbol_short!("LOCK");

pub fn balance(env: &Env, id: &Address) -> i128 {
    let key = (BALANCE, id.clone());
    let value: Option<i128> = env.storage().persistent().get(&key);
    if value.is_some() {
        ttl::extend_persistent(env, &key);
    }
    value.unwrap_or(0)
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    let key = (BALANCE, id.clone());
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(ALLOWANCE, from.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = (ALLOWANCE, from.clone(), spender.clone());
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

pub fn is_whitelisted(env: &Env, id: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(WHITELIST, id.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, id: &Address, allowed: bool) {
    let key = (WHITELIST, id.clone());
    env.storage().persistent().set(&key, &allowed);
    ttl::extend_persistent(env, &key);
}

pub fn lock_class(env: &Env, id: &Address) -> Option<LockClass> {
    env.storage().persistent().get(&(LOCK_CLASS, id.clone()))
}

/// Records a lock class. Classes are permanent, so an existing class is
/// left untouched and `false` is returned.
pub fn classify(env: &Env, id: &Address, class: LockClass) -> bool {
    let key = (LOCK_CLASS, id.clone());
    if env.storage().persistent().has(&key) {
        ttl::extend_persistent(env, &key);
        return false;
    }
    env.storage().persistent().set(&key, &class);
    ttl::extend_persistent(env, &key);
    true
}
