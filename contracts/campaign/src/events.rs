#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the campaign is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub pricing_strategy: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub minimum_goal: i128,
    pub maximum_goal: i128,
    pub timestamp: u64,
}

/// Fired for every accepted contribution. `registered` is true for
/// admin-registered payments settled outside the ledger.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionEvent {
    pub investor: Address,
    pub amount: i128,
    pub tokens: i128,
    pub total_raised: i128,
    pub registered: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundLoadedEvent {
    pub beneficiary: Address,
    pub amount: i128,
    pub escrow: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundedEvent {
    pub investor: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinalizedEvent {
    pub total_raised: i128,
    pub tokens_sold: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PricingStrategySetEvent {
    pub pricing_strategy: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyParticipantEditedEvent {
    pub account: Address,
    pub allowed: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminSetEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    pricing_strategy: Address,
    start_time: u64,
    end_time: u64,
    minimum_goal: i128,
    maximum_goal: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            pricing_strategy,
            start_time,
            end_time,
            minimum_goal,
            maximum_goal,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_contribution(
    env: &Env,
    investor: Address,
    amount: i128,
    tokens: i128,
    total_raised: i128,
    registered: bool,
) {
    env.events().publish(
        (symbol_short!("CONTRIB"), investor.clone()),
        ContributionEvent {
            investor,
            amount,
            tokens,
            total_raised,
            registered,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_refund_loaded(env: &Env, beneficiary: Address, amount: i128, escrow: i128) {
    env.events().publish(
        (symbol_short!("RFND_LOAD"),),
        RefundLoadedEvent {
            beneficiary,
            amount,
            escrow,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_refunded(env: &Env, investor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("REFUNDED"), investor.clone()),
        RefundedEvent {
            investor,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_finalized(env: &Env, total_raised: i128, tokens_sold: i128) {
    env.events().publish(
        (symbol_short!("FINALIZED"),),
        FinalizedEvent {
            total_raised,
            tokens_sold,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pricing_strategy_set(env: &Env, pricing_strategy: Address) {
    env.events().publish(
        (symbol_short!("PRICE_SET"),),
        PricingStrategySetEvent {
            pricing_strategy,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_early_participant_edited(env: &Env, account: Address, allowed: bool) {
    env.events().publish(
        (symbol_short!("EARLY_WL"), account.clone()),
        EarlyParticipantEditedEvent {
            account,
            allowed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_set(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("ADMIN_SET"),),
        AdminSetEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
