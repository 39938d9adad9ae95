#![no_std]

pub mod events;
pub mod tiers;

use common::{ttl, CrowdsaleError, PricingStrategyInterface, RateInfo, Tier};
use soroban_sdk::{contract, contractimpl, symbol_short, Env, Symbol, Vec};

// ── Storage key constants ────────────────────────────────────────────────────

const TIERS: Symbol = symbol_short!("TIERS");

// ── Contract ─────────────────────────────────────────────────────────────────

/// Immutable tier table. Campaigns replace pricing by pointing at a
/// different deployment, never by editing this one.
#[contract]
pub struct PricingStrategyContract;

#[contractimpl]
impl PricingStrategyContract {
    /// Store the tier table. Callable once.
    ///
    /// Each entry is `(threshold, rate)`; thresholds must be strictly
    /// increasing and every rate positive.
    pub fn initialize(env: Env, tiers: Vec<Tier>) -> Result<(), CrowdsaleError> {
        if env.storage().instance().has(&TIERS) {
            return Err(CrowdsaleError::AlreadyInitialized);
        }
        tiers::validate(&tiers)?;

        env.storage().instance().set(&TIERS, &tiers);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, tiers.len());

        Ok(())
    }

    pub fn get_tiers(env: Env) -> Result<Vec<Tier>, CrowdsaleError> {
        Self::load_tiers(&env)
    }

    pub fn tier_count(env: Env) -> u32 {
        Self::load_tiers(&env).map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&TIERS)
    }

    fn load_tiers(env: &Env) -> Result<Vec<Tier>, CrowdsaleError> {
        env.storage()
            .instance()
            .get(&TIERS)
            .ok_or(CrowdsaleError::NotInitialized)
    }
}

#[contractimpl]
impl PricingStrategyInterface for PricingStrategyContract {
    /// Tokens for `contribution` given `already_raised`, split across every
    /// tier boundary the contribution crosses.
    fn calculate_token_amount(
        env: Env,
        contribution: i128,
        already_raised: i128,
    ) -> Result<i128, CrowdsaleError> {
        let table = Self::load_tiers(&env)?;
        tiers::calculate_token_amount(&table, contribution, already_raised)
    }

    fn current_rate(env: Env, already_raised: i128) -> Result<RateInfo, CrowdsaleError> {
        let table = Self::load_tiers(&env)?;
        tiers::current_rate(&table, already_raised)
    }
}
