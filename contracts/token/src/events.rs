#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the token is created and the supply minted to the owner.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub total_supply: i128,
    pub ico_end_time: u64,
    pub founder_count: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalEvent {
    pub from: Address,
    pub spender: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the owner flips the token into its active state.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivatedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistEditedEvent {
    pub account: Address,
    pub allowed: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleAddressSetEvent {
    pub sale: Address,
    pub timestamp: u64,
}

/// Fired when the sale contract marks a buyer as a presale buyer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeLockedEvent {
    pub account: Address,
    pub unlock_at: u64,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    total_supply: i128,
    ico_end_time: u64,
    founder_count: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            total_supply,
            ico_end_time,
            founder_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone(), to.clone()),
        TransferEvent {
            from,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_approval(env: &Env, from: Address, spender: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("APPROVE"), from.clone()),
        ApprovalEvent {
            from,
            spender,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_activated(env: &Env, owner: Address) {
    env.events().publish(
        (symbol_short!("ACTIVATED"),),
        ActivatedEvent {
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_whitelist_edited(env: &Env, account: Address, allowed: bool) {
    env.events().publish(
        (symbol_short!("WL_EDIT"), account.clone()),
        WhitelistEditedEvent {
            account,
            allowed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_sale_address_set(env: &Env, sale: Address) {
    env.events().publish(
        (symbol_short!("SALE_SET"),),
        SaleAddressSetEvent {
            sale,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_time_locked(env: &Env, account: Address, unlock_at: u64) {
    env.events().publish(
        (symbol_short!("TIME_LOCK"), account.clone()),
        TimeLockedEvent {
            account,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}
