//! Transfer eligibility rules.
//!
//! Evaluated on every balance mutation, always from the supplied timestamp.
//! Nothing here is cached: a lock expires by time passing, never by a write.
//!
//! Rules, in order:
//! 1. A sender holding a lock class whose expiry is still in the future is
//!    denied, whether or not the token is active.
//! 2. Before activation a transfer is allowed only if either endpoint is
//!    whitelisted.

use common::{CrowdsaleError, LockClass};

/// Token-wide inputs to the rules.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GatePolicy {
    pub activated: bool,
    pub ico_end_time: u64,
    pub presale_lock_duration: u64,
}

/// Inputs for the sending account. Only the sender can be locked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sender {
    pub whitelisted: bool,
    pub lock: Option<LockClass>,
}

/// Inputs for the receiving account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Recipient {
    pub whitelisted: bool,
}

/// First timestamp at which a holder of `class` may send tokens.
pub fn lock_expiry(class: &LockClass, policy: &GatePolicy) -> u64 {
    match class {
        LockClass::PresaleBuyer => policy
            .ico_end_time
            .saturating_add(policy.presale_lock_duration),
        LockClass::Founder(vesting_duration) => {
            policy.ico_end_time.saturating_add(*vesting_duration)
        }
    }
}

pub fn evaluate(
    policy: &GatePolicy,
    from: &Sender,
    to: &Recipient,
    now: u64,
) -> Result<(), CrowdsaleError> {
    if let Some(class) = &from.lock {
        if now < lock_expiry(class, policy) {
            return Err(CrowdsaleError::TransferDenied);
        }
    }

    if !policy.activated && !from.whitelisted && !to.whitelisted {
        return Err(CrowdsaleError::TransferDenied);
    }
    Ok(())
}
