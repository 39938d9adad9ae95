//! Step-wise tier arithmetic.
//!
//! All functions are pure over a tier table and use checked `i128`
//! arithmetic throughout.

use common::{CrowdsaleError, RateInfo, Tier};
use soroban_sdk::Vec;

/// Checks the construction-time invariants of a tier table:
/// non-empty, first threshold above zero, strictly increasing thresholds,
/// positive rates.
pub fn validate(tiers: &Vec<Tier>) -> Result<(), CrowdsaleError> {
    if tiers.is_empty() {
        return Err(CrowdsaleError::InvalidConfiguration);
    }

    let mut previous: i128 = 0;
    for tier in tiers.iter() {
        if tier.threshold <= previous || tier.rate <= 0 {
            return Err(CrowdsaleError::InvalidConfiguration);
        }
        previous = tier.threshold;
    }
    Ok(())
}

/// Locates the tier containing `raised`.
///
/// Tier `i` covers `[threshold[i-1], threshold[i])`, with tier 0 starting at
/// zero. A value sitting exactly on a threshold belongs to the tier it is
/// entering.
pub fn locate(tiers: &Vec<Tier>, raised: i128) -> Result<(u32, Tier), CrowdsaleError> {
    if raised < 0 {
        return Err(CrowdsaleError::InvalidAmount);
    }
    for (index, tier) in tiers.iter().enumerate() {
        if raised < tier.threshold {
            return Ok((index as u32, tier));
        }
    }
    Err(CrowdsaleError::TiersExhausted)
}

pub fn current_rate(tiers: &Vec<Tier>, raised: i128) -> Result<RateInfo, CrowdsaleError> {
    let (tier_index, tier) = locate(tiers, raised)?;
    Ok(RateInfo {
        rate: tier.rate,
        tier_index,
    })
}

/// Prices `contribution` starting from `already_raised`, splitting it across
/// every tier boundary it crosses.
///
/// The contribution is priced in full or not at all: if the table runs out
/// before the remainder is consumed the call fails with `TiersExhausted`.
pub fn calculate_token_amount(
    tiers: &Vec<Tier>,
    contribution: i128,
    already_raised: i128,
) -> Result<i128, CrowdsaleError> {
    if contribution < 0 || already_raised < 0 {
        return Err(CrowdsaleError::InvalidAmount);
    }
    if contribution == 0 {
        return Ok(0);
    }

    let mut raised = already_raised;
    let mut remaining = contribution;
    let mut tokens: i128 = 0;

    while remaining > 0 {
        let (_, tier) = locate(tiers, raised)?;

        // `raised < tier.threshold` holds after `locate`, so room is positive.
        let room = tier
            .threshold
            .checked_sub(raised)
            .ok_or(CrowdsaleError::Overflow)?;
        let slice = if remaining < room { remaining } else { room };

        let issued = slice
            .checked_mul(tier.rate)
            .ok_or(CrowdsaleError::Overflow)?;
        tokens = tokens
            .checked_add(issued)
            .ok_or(CrowdsaleError::Overflow)?;

        raised = raised.checked_add(slice).ok_or(CrowdsaleError::Overflow)?;
        remaining -= slice;
    }

    Ok(tokens)
}
