//! Cross-contract interfaces.
//!
//! The campaign only ever reaches the pricing strategy and the token through
//! these traits. The pricing and token contracts implement them directly, so
//! a signature drift fails to compile on the implementing side.

use soroban_sdk::{contractclient, Address, Env};

use crate::{CrowdsaleError, RateInfo};

/// Tier-table pricing strategy.
#[contractclient(name = "PricingStrategyClient")]
pub trait PricingStrategyInterface {
    /// Tokens issued for `contribution` when `already_raised` has been
    /// raised before it.
    fn calculate_token_amount(
        env: Env,
        contribution: i128,
        already_raised: i128,
    ) -> Result<i128, CrowdsaleError>;

    /// Rate and tier index in effect at `already_raised`.
    fn current_rate(env: Env, already_raised: i128) -> Result<RateInfo, CrowdsaleError>;
}

/// The part of the gated token a sale contract drives.
#[contractclient(name = "GatedTokenClient")]
pub trait GatedTokenInterface {
    /// Move `amount` from `from` to `to` on behalf of `spender`.
    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError>;

    /// Classify `account` as a presale buyer. Only the sale address may call.
    fn add_to_time_locked_list(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), CrowdsaleError>;
}
