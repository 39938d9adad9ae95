//! Investor ledger.
//!
//! `invested` counts every accepted contribution, on-ledger or registered.
//! `refundable` counts only payment-currency inflow and is the sole source
//! of truth for refunds.

use common::{ttl, CrowdsaleError};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// Per-account persistent storage uses tuple keys: (prefix, address)
const INVESTED: Symbol = symbol_short!("INVESTED");
const REFUNDABLE: Symbol = symbol_short!("PAID");
const TOKENS: Symbol = symbol_short!("TOKENS");
const EARLY: Symbol = symbol_short!("EARLY");

/// Post-contribution values for one investor, computed before anything is
/// written so a failed contribution never leaves a partial entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub invested: i128,
    pub refundable: i128,
    pub tokens: i128,
    pub first_contribution: bool,
}

fn read(env: &Env, prefix: Symbol, investor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(prefix, investor.clone()))
        .unwrap_or(0)
}

fn write(env: &Env, prefix: Symbol, investor: &Address, value: i128) {
    let key = (prefix, investor.clone());
    env.storage().persistent().set(&key, &value);
    ttl::extend_persistent(env, &key);
}

pub fn invested_of(env: &Env, investor: &Address) -> i128 {
    read(env, INVESTED, investor)
}

pub fn refundable_of(env: &Env, investor: &Address) -> i128 {
    read(env, REFUNDABLE, investor)
}

pub fn tokens_of(env: &Env, investor: &Address) -> i128 {
    read(env, TOKENS, investor)
}

pub fn is_early_participant(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(EARLY, account.clone()))
        .unwrap_or(false)
}

pub fn set_early_participant(env: &Env, account: &Address, allowed: bool) {
    let key = (EARLY, account.clone());
    env.storage().persistent().set(&key, &allowed);
    ttl::extend_persistent(env, &key);
}

/// Computes the entry after adding `amount` / `tokens`. `refundable` only
/// grows when the contribution carried payment currency.
pub fn preview(
    env: &Env,
    investor: &Address,
    amount: i128,
    tokens: i128,
    refundable: bool,
) -> Result<Entry, CrowdsaleError> {
    let previous_tokens = tokens_of(env, investor);
    let previous_invested = invested_of(env, investor);
    let previous_refundable = refundable_of(env, investor);

    let refundable_delta = if refundable { amount } else { 0 };

    Ok(Entry {
        invested: previous_invested
            .checked_add(amount)
            .ok_or(CrowdsaleError::Overflow)?,
        refundable: previous_refundable
            .checked_add(refundable_delta)
            .ok_or(CrowdsaleError::Overflow)?,
        tokens: previous_tokens
            .checked_add(tokens)
            .ok_or(CrowdsaleError::Overflow)?,
        first_contribution: previous_tokens == 0 && previous_invested == 0,
    })
}

pub fn store(env: &Env, investor: &Address, entry: &Entry) {
    write(env, INVESTED, investor, entry.invested);
    write(env, REFUNDABLE, investor, entry.refundable);
    write(env, TOKENS, investor, entry.tokens);
}

/// Zeroes the refundable entry and removes the same amount from the
/// invested total. Returns the amount cleared.
pub fn clear_refundable(env: &Env, investor: &Address) -> i128 {
    let refundable = refundable_of(env, investor);
    let invested = invested_of(env, investor);

    write(env, REFUNDABLE, investor, 0);
    write(env, INVESTED, investor, invested.saturating_sub(refundable));
    refundable
}
