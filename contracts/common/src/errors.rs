use soroban_sdk::contracterror;

/// Error codes shared by the pricing, campaign and token contracts.
///
/// A single enum keeps a code meaning the same thing on every contract, so a
/// failure raised inside a cross-contract call can be handed back to the
/// original caller unchanged.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authorisation                  |
/// | 20 – 29 | Campaign phase                 |
/// | 30 – 39 | Amount constraints             |
/// | 40 – 49 | Pricing arithmetic             |
/// | 50 – 59 | Token transfer gating          |
/// | 60 – 69 | Refund path                    |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CrowdsaleError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// `initialize` was called more than once.
    AlreadyInitialized = 2,

    /// Construction parameters violate an invariant (non-monotonic tiers,
    /// `start >= end`, `min > max`, ...).
    InvalidConfiguration = 3,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller does not hold the role the operation requires.
    Unauthorized = 10,

    // ── Phase (20–29) ────────────────────────────────────────
    /// The campaign has not started and the caller is not an early participant.
    NotStarted = 20,

    /// The campaign window has closed.
    Ended = 21,

    /// The maximum goal has been raised; no further contributions.
    HardCapReached = 22,

    /// The operation is only valid once the campaign window has closed.
    NotEnded = 23,

    /// The campaign has already been finalised.
    AlreadyFinalized = 24,

    // ── Amounts (30–39) ──────────────────────────────────────
    /// Amount is zero or negative where a positive value is required.
    InvalidAmount = 30,

    /// Contribution is below the applicable per-transaction floor.
    BelowMinimum = 31,

    /// Contribution would push the raised total past the maximum goal.
    CapExceeded = 32,

    /// Token balance too small for the requested transfer.
    InsufficientBalance = 33,

    /// Spender allowance too small for the requested transfer.
    InsufficientAllowance = 34,

    // ── Pricing (40–49) ──────────────────────────────────────
    /// The tier table cannot price the contribution in full.
    TiersExhausted = 40,

    /// Checked arithmetic overflowed.
    Overflow = 41,

    // ── Transfer gate (50–59) ────────────────────────────────
    /// The token refused the transfer (inactive token or vesting lock).
    TransferDenied = 50,

    // ── Refund (60–69) ───────────────────────────────────────
    /// The minimum goal was met, so refunds are not available.
    GoalReached = 60,

    /// No refundable balance, or the escrow cannot cover it.
    NothingToRefund = 61,

    /// The minimum goal was missed, so the campaign cannot be finalised.
    GoalNotReached = 62,
}

/// Coarse classification of [`CrowdsaleError`] for callers that only need
/// to know which kind of rule was violated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Lifecycle,
    Authorization,
    PhaseViolation,
    AmountConstraint,
    Pricing,
    Transfer,
    Refund,
}

impl CrowdsaleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CrowdsaleError::NotInitialized
            | CrowdsaleError::AlreadyInitialized
            | CrowdsaleError::InvalidConfiguration => ErrorCategory::Lifecycle,
            CrowdsaleError::Unauthorized => ErrorCategory::Authorization,
            CrowdsaleError::NotStarted
            | CrowdsaleError::Ended
            | CrowdsaleError::HardCapReached
            | CrowdsaleError::NotEnded
            | CrowdsaleError::AlreadyFinalized => ErrorCategory::PhaseViolation,
            CrowdsaleError::InvalidAmount
            | CrowdsaleError::BelowMinimum
            | CrowdsaleError::CapExceeded
            | CrowdsaleError::InsufficientBalance
            | CrowdsaleError::InsufficientAllowance => ErrorCategory::AmountConstraint,
            CrowdsaleError::TiersExhausted | CrowdsaleError::Overflow => ErrorCategory::Pricing,
            CrowdsaleError::TransferDenied => ErrorCategory::Transfer,
            CrowdsaleError::GoalReached
            | CrowdsaleError::NothingToRefund
            | CrowdsaleError::GoalNotReached => ErrorCategory::Refund,
        }
    }
}
