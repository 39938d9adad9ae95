#![cfg(test)]

use common::CrowdsaleError;
use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{setup, Setup, END, MAX_GOAL, MIN_GOAL, START, WALLET};
use crate::Phase;

/// Two investors raise 150 in total, short of the minimum goal.
fn missed_goal() -> (Setup, Address, Address) {
    let s = setup();
    let first = s.investor();
    let second = s.investor();
    s.at(START);
    s.client.contribute(&first, &100);
    s.client.contribute(&second, &50);
    (s, first, second)
}

// ── Refund escrow ─────────────────────────────────────────────────────────────

#[test]
fn test_load_refund_rules() {
    let (s, first, _) = missed_goal();

    let res = s.client.try_load_refund(&s.beneficiary, &150);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NotEnded);

    s.at(END);
    let res = s.client.try_load_refund(&first, &150);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);

    let res = s.client.try_load_refund(&s.beneficiary, &0);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::InvalidAmount);

    assert_eq!(s.client.get_phase(), Phase::Ended);
    s.client.load_refund(&s.beneficiary, &100);
    assert_eq!(s.client.get_phase(), Phase::Refunding);
    s.client.load_refund(&s.beneficiary, &50);

    assert_eq!(s.client.refund_escrow(), 150);
    assert_eq!(s.payment.balance(&s.beneficiary), 0);
    assert_eq!(s.payment.balance(&s.client.address), 150);
}

#[test]
fn test_refund_round_trip() {
    let (s, first, second) = missed_goal();

    let res = s.client.try_refund(&first);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NotEnded);

    s.at(END);
    // No escrow yet.
    let res = s.client.try_refund(&first);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NothingToRefund);

    s.client.load_refund(&s.beneficiary, &150);

    assert_eq!(s.client.refund(&first), 100);
    assert_eq!(s.payment.balance(&first), WALLET);
    assert_eq!(s.client.refundable_amount_of(&first), 0);
    assert_eq!(s.client.invested_amount_of(&first), 0);
    assert_eq!(s.client.refund_escrow(), 50);

    let res = s.client.try_refund(&first);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NothingToRefund);

    assert_eq!(s.client.refund(&second), 50);
    assert_eq!(s.client.total_refunded(), 150);
    assert_eq!(s.client.refund_escrow(), 0);
    // Tokens already issued stay with the investor.
    assert_eq!(s.client.tokens_issued_to(&first), 200);
}

#[test]
fn test_refund_waits_for_enough_escrow() {
    let (s, first, _) = missed_goal();
    s.at(END);

    s.client.load_refund(&s.beneficiary, &60);
    let res = s.client.try_refund(&first);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NothingToRefund);
    assert_eq!(s.client.refund_escrow(), 60);

    s.client.load_refund(&s.beneficiary, &40);
    assert_eq!(s.client.refund(&first), 100);
    assert_eq!(s.client.refund_escrow(), 0);
}

#[test]
fn test_registered_contribution_is_not_refundable() {
    let s = setup();
    let admin = Address::generate(&s.env);
    let investor = s.investor();
    s.client.set_admin(&s.owner, &admin);
    s.at(START);

    s.client.register_payment(&admin, &investor, &100);
    s.client.contribute(&investor, &20);
    assert_eq!(s.client.invested_amount_of(&investor), 120);
    assert_eq!(s.client.refundable_amount_of(&investor), 20);

    s.at(END);
    s.client.load_refund(&s.beneficiary, &20);
    assert_eq!(s.client.refund(&investor), 20);
    assert_eq!(s.client.invested_amount_of(&investor), 100);

    let res = s.client.try_refund(&investor);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NothingToRefund);
}

#[test]
fn test_registered_only_account_cannot_refund() {
    let s = setup();
    let admin = Address::generate(&s.env);
    let account = Address::generate(&s.env);
    let investor = s.investor();
    s.client.set_admin(&s.owner, &admin);
    s.at(START);

    s.client.register_payment(&admin, &account, &100);
    s.client.contribute(&investor, &50);

    s.at(END);
    s.client.load_refund(&s.beneficiary, &50);
    let res = s.client.try_refund(&account);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NothingToRefund);
    assert_eq!(s.client.refund_escrow(), 50);
}

#[test]
fn test_no_refund_once_goal_reached() {
    let s = setup();
    let investor = s.investor();
    s.at(START);
    s.client.contribute(&investor, &MIN_GOAL);

    s.at(END);
    let res = s.client.try_refund(&investor);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::GoalReached);
    let res = s.client.try_load_refund(&s.beneficiary, &MIN_GOAL);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::GoalReached);
}

// ── Finalisation ──────────────────────────────────────────────────────────────

#[test]
fn test_finalize_after_successful_window() {
    let s = setup();
    let investor = s.investor();
    let outsider = Address::generate(&s.env);
    s.at(START);
    s.client.contribute(&investor, &MIN_GOAL);

    let res = s.client.try_finalize(&s.owner);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::NotEnded);

    s.at(END);
    let res = s.client.try_finalize(&outsider);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Unauthorized);

    s.client.finalize(&s.owner);
    assert!(s.client.is_finalized());
    assert_eq!(s.client.get_phase(), Phase::Finalized);

    let res = s.client.try_finalize(&s.owner);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::AlreadyFinalized);
    let res = s.client.try_contribute(&investor, &100);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::Ended);
}

#[test]
fn test_finalize_at_hard_cap_before_end() {
    let s = setup();
    let investor = s.investor();
    s.at(START);
    s.client.contribute(&investor, &MAX_GOAL);
    assert_eq!(s.client.get_phase(), Phase::HardCapReached);

    s.client.finalize(&s.owner);
    assert_eq!(s.client.get_phase(), Phase::Finalized);
}

#[test]
fn test_finalize_below_goal_fails() {
    let (s, _, _) = missed_goal();
    s.at(END);

    let res = s.client.try_finalize(&s.owner);
    assert_eq!(res.unwrap_err().unwrap(), CrowdsaleError::GoalNotReached);
    assert!(!s.client.is_finalized());
}
