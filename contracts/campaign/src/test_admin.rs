#![cfg(test)]

use common::CrowdsaleError;
use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{deploy_pricing, setup, START, WHITELISTED_MIN};

// ── Ownership transfer ────────────────────────────────────────────────────────

#[test]
fn test_two_step_ownership_transfer() {
    let s = setup();
    let successor = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);

    let res = s.client.try_propose_owner(&stranger, &successor);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);

    s.client.propose_owner(&s.owner, &successor);
    assert_eq!(s.client.get_pending_owner(), Some(successor.clone()));
    // Nothing changes until the proposed owner accepts.
    assert_eq!(s.client.get_owner(), s.owner);

    let res = s.client.try_accept_owner(&stranger);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);

    s.client.accept_owner(&successor);
    assert_eq!(s.client.get_owner(), successor);
    assert_eq!(s.client.get_pending_owner(), None);

    let res = s.client.try_set_admin(&s.owner, &stranger);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);
    s.client.set_admin(&successor, &stranger);
    assert_eq!(s.client.get_admin(), Some(stranger));
}

#[test]
fn test_cancel_owner_transfer() {
    let s = setup();
    let successor = Address::generate(&s.env);

    s.client.propose_owner(&s.owner, &successor);
    s.client.cancel_owner_transfer(&s.owner);
    assert_eq!(s.client.get_pending_owner(), None);

    let res = s.client.try_accept_owner(&successor);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);
    assert_eq!(s.client.get_owner(), s.owner);

    // Cancelling with nothing pending is harmless.
    s.client.cancel_owner_transfer(&s.owner);
}

// ── Pricing strategy ──────────────────────────────────────────────────────────

#[test]
fn test_swap_pricing_strategy() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    let investor = s.investor();
    let flat = deploy_pricing(&s.env, &[(5_000, 10)]);

    let res = s.client.try_set_pricing_strategy(&stranger, &flat);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);

    s.client.set_pricing_strategy(&s.owner, &flat);
    assert_eq!(s.client.get_pricing_strategy(), flat);
    assert_eq!(s.client.preview_token_amount(&100), 1_000);

    s.at(START);
    assert_eq!(s.client.contribute(&investor, &100), 1_000);
    assert_eq!(s.client.current_rate().rate, 10);
}

// ── Early participants ────────────────────────────────────────────────────────

#[test]
fn test_early_participant_whitelist_is_owner_only() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    let investor = s.investor();

    let res = s
        .client
        .try_edit_early_participant_whitelist(&stranger, &investor, &true);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);
    assert!(!s.client.is_early_participant(&investor));

    s.whitelist(&investor);
    s.client.contribute(&investor, &WHITELISTED_MIN);

    s.client
        .edit_early_participant_whitelist(&s.owner, &investor, &false);
    let res = s.client.try_contribute(&investor, &WHITELISTED_MIN);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NotStarted);
}
