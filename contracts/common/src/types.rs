use soroban_sdk::{contracttype, Address};

/// One step of a pricing curve.
///
/// `threshold` is the cumulative raised amount at which this tier ends and
/// the next one begins; `rate` is the number of tokens issued per unit
/// contributed while inside the tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub threshold: i128,
    pub rate: i128,
}

/// Result of a rate lookup: the active rate and the index of its tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateInfo {
    pub rate: i128,
    pub tier_index: u32,
}

/// Vesting classification of a token holder.
///
/// Holders without a class are never locked. Every class expires at a
/// horizon measured from the end of the ICO window.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LockClass {
    /// Bought during a presale; locked for the token's presale lock duration.
    PresaleBuyer,
    /// Project founder; locked for the carried vesting duration in seconds.
    Founder(u64),
}

/// Founder vesting entry supplied at token construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FounderLock {
    pub account: Address,
    pub vesting_duration: u64,
}
