//! Lifecycle phase, derived on demand from stored state and the current
//! timestamp. The phase is never persisted.

use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Before `start_time`; only early participants may contribute.
    Pending,
    /// Inside the window with room left under the maximum goal.
    Active,
    /// The maximum goal has been raised.
    HardCapReached,
    /// The window has closed.
    Ended,
    /// Closed below the minimum goal with refund escrow loaded.
    Refunding,
    /// Closed and finalised by the owner.
    Finalized,
}

/// The stored values the phase depends on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub start_time: u64,
    pub end_time: u64,
    pub minimum_goal: i128,
    pub maximum_goal: i128,
    pub total_raised: i128,
    pub refund_loaded: bool,
    pub finalized: bool,
}

pub fn derive(snapshot: &Snapshot, now: u64) -> Phase {
    if snapshot.finalized {
        return Phase::Finalized;
    }
    if now >= snapshot.end_time {
        if snapshot.total_raised < snapshot.minimum_goal && snapshot.refund_loaded {
            return Phase::Refunding;
        }
        return Phase::Ended;
    }
    if snapshot.total_raised >= snapshot.maximum_goal {
        return Phase::HardCapReached;
    }
    if now < snapshot.start_time {
        return Phase::Pending;
    }
    Phase::Active
}
