#![no_std]

pub mod events;
pub mod ledger;
pub mod phase;

use common::{ttl, CrowdsaleError, GatedTokenClient, PricingStrategyClient, RateInfo};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

pub use phase::Phase;

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const ADMIN: Symbol = symbol_short!("ADMIN");
const CONFIG: Symbol = symbol_short!("CONFIG");
const PRICING: Symbol = symbol_short!("PRICING");
const TOTAL_RAISED: Symbol = symbol_short!("RAISED");
const TOKENS_SOLD: Symbol = symbol_short!("SOLD");
const INVESTOR_COUNT: Symbol = symbol_short!("INV_CNT");
const REFUND_ESCROW: Symbol = symbol_short!("ESCROW");
const REFUND_LOADED: Symbol = symbol_short!("LOADED");
const TOTAL_REFUNDED: Symbol = symbol_short!("REFUNDED");
const FINALIZED: Symbol = symbol_short!("FINAL");

// ── Public-facing types ──────────────────────────────────────────────────────

/// Campaign parameters, validated once at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub start_time: u64,
    pub end_time: u64,
    /// Receives every payment and is the only account that loads refunds.
    pub beneficiary: Address,
    pub minimum_goal: i128,
    pub maximum_goal: i128,
    /// Per-transaction floor for everyone.
    pub minimum_contribution: i128,
    /// Separate floor applied to early participants when set.
    pub whitelisted_minimum: Option<i128>,
    /// The gated token being distributed.
    pub token: Address,
    /// Holder of the distributed supply. Must approve this contract.
    pub token_treasury: Address,
    /// Currency contributions are paid in.
    pub payment_token: Address,
    /// Mark every buyer as a time-locked presale buyer on the token.
    pub lock_buyers: bool,
    /// Raised by earlier rounds; offsets the campaign on the tier table.
    pub pricing_baseline: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the campaign.
    ///
    /// * `owner`            – may finalise and administer the campaign.
    /// * `config`           – window, goals, floors and the three contracts.
    /// * `pricing_strategy` – contract implementing the tier table.
    pub fn initialize(
        env: Env,
        owner: Address,
        config: CampaignConfig,
        pricing_strategy: Address,
    ) -> Result<(), CrowdsaleError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(CrowdsaleError::AlreadyInitialized);
        }
        Self::validate_config(&config)?;

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&PRICING, &pricing_strategy);
        env.storage().instance().set(&FINALIZED, &false);
        // Counters start at zero; unwrap_or(0) covers absent keys.
        ttl::extend_instance(&env);

        events::publish_initialized(
            &env,
            owner,
            pricing_strategy,
            config.start_time,
            config.end_time,
            config.minimum_goal,
            config.maximum_goal,
        );

        Ok(())
    }

    // ── Contributions ───────────────────────────────────────────────────────

    /// Buy tokens with `amount` of the payment currency. Returns the number of
    /// tokens issued to `sender`.
    pub fn contribute(env: Env, sender: Address, amount: i128) -> Result<i128, CrowdsaleError> {
        Self::require_initialized(&env)?;
        sender.require_auth();

        Self::purchase(&env, &sender, amount, true)
    }

    /// Record a contribution settled outside the ledger. Tokens are issued
    /// as usual but the amount never becomes refundable.
    pub fn register_payment(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<i128, CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(CrowdsaleError::Unauthorized)?;
        if caller != admin {
            return Err(CrowdsaleError::Unauthorized);
        }

        Self::purchase(&env, &account, amount, false)
    }

    // ── Refunds ─────────────────────────────────────────────────────────────

    /// Move `amount` of the payment currency from the beneficiary into the
    /// refund escrow. Only possible once the window closed below the goal.
    pub fn load_refund(env: Env, caller: Address, amount: i128) -> Result<(), CrowdsaleError> {
        let config = Self::load_config(&env)?;
        caller.require_auth();

        if caller != config.beneficiary {
            return Err(CrowdsaleError::Unauthorized);
        }
        if amount <= 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }
        if env.ledger().timestamp() < config.end_time {
            return Err(CrowdsaleError::NotEnded);
        }
        // A finalised campaign always met its goal, so this also closes
        // the escrow after finalisation.
        if Self::total_raised(env.clone()) >= config.minimum_goal {
            return Err(CrowdsaleError::GoalReached);
        }

        let escrow = Self::refund_escrow(env.clone())
            .checked_add(amount)
            .ok_or(CrowdsaleError::Overflow)?;
        let loaded = Self::counter(&env, &REFUND_LOADED)
            .checked_add(amount)
            .ok_or(CrowdsaleError::Overflow)?;

        token::Client::new(&env, &config.payment_token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        env.storage().instance().set(&REFUND_ESCROW, &escrow);
        env.storage().instance().set(&REFUND_LOADED, &loaded);
        ttl::extend_instance(&env);

        events::publish_refund_loaded(&env, caller, amount, escrow);

        Ok(())
    }

    /// Return `investor`'s refundable contribution from the escrow.
    pub fn refund(env: Env, investor: Address) -> Result<i128, CrowdsaleError> {
        let config = Self::load_config(&env)?;
        investor.require_auth();

        if Self::total_raised(env.clone()) >= config.minimum_goal {
            return Err(CrowdsaleError::GoalReached);
        }
        if env.ledger().timestamp() < config.end_time {
            return Err(CrowdsaleError::NotEnded);
        }

        let owed = ledger::refundable_of(&env, &investor);
        let escrow = Self::refund_escrow(env.clone());
        if owed <= 0 || escrow < owed {
            return Err(CrowdsaleError::NothingToRefund);
        }
        let refunded = Self::total_refunded(env.clone())
            .checked_add(owed)
            .ok_or(CrowdsaleError::Overflow)?;

        ledger::clear_refundable(&env, &investor);
        env.storage().instance().set(&REFUND_ESCROW, &(escrow - owed));
        env.storage().instance().set(&TOTAL_REFUNDED, &refunded);

        token::Client::new(&env, &config.payment_token).transfer(
            &env.current_contract_address(),
            &investor,
            &owed,
        );

        events::publish_refunded(&env, investor, owed);

        Ok(owed)
    }

    // ── Finalisation ────────────────────────────────────────────────────────

    /// Close a successful campaign for good.
    pub fn finalize(env: Env, caller: Address) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let config = Self::load_config(&env)?;
        match Self::current_phase(&env, &config) {
            Phase::Finalized => return Err(CrowdsaleError::AlreadyFinalized),
            Phase::Ended | Phase::HardCapReached => {}
            _ => return Err(CrowdsaleError::NotEnded),
        }

        let raised = Self::total_raised(env.clone());
        if raised < config.minimum_goal {
            return Err(CrowdsaleError::GoalNotReached);
        }

        env.storage().instance().set(&FINALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_finalized(&env, raised, Self::tokens_sold(env.clone()));

        Ok(())
    }

    // ── Owner administration ────────────────────────────────────────────────

    /// Point the campaign at a different tier table.
    pub fn set_pricing_strategy(
        env: Env,
        caller: Address,
        pricing_strategy: Address,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&PRICING, &pricing_strategy);
        events::publish_pricing_strategy_set(&env, pricing_strategy);

        Ok(())
    }

    /// Grant or revoke the right to contribute before `start_time`.
    pub fn edit_early_participant_whitelist(
        env: Env,
        caller: Address,
        account: Address,
        allowed: bool,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        ledger::set_early_participant(&env, &account, allowed);
        events::publish_early_participant_edited(&env, account, allowed);

        Ok(())
    }

    /// Set the account allowed to register off-ledger payments.
    pub fn set_admin(env: Env, caller: Address, admin: Address) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&ADMIN, &admin);
        events::publish_admin_set(&env, admin);

        Ok(())
    }

    /// Propose a new owner. Ownership moves only once the proposed account
    /// calls `accept_owner`.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        env.storage().instance().set(&PENDING_OWNER, &new_owner);
        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(CrowdsaleError::Unauthorized)?;
        if new_owner != pending {
            return Err(CrowdsaleError::Unauthorized);
        }

        let old_owner = Self::get_owner(env.clone())?;
        env.storage().instance().set(&OWNER, &new_owner);
        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Drop a pending proposal. A no-op when nothing is pending.
    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        let pending: Option<Address> = env.storage().instance().get(&PENDING_OWNER);
        if let Some(cancelled) = pending {
            env.storage().instance().remove(&PENDING_OWNER);
            events::publish_owner_transfer_cancelled(&env, current_owner, cancelled);
        }

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<CampaignConfig, CrowdsaleError> {
        Self::load_config(&env)
    }

    pub fn get_phase(env: Env) -> Result<Phase, CrowdsaleError> {
        let config = Self::load_config(&env)?;
        Ok(Self::current_phase(&env, &config))
    }

    pub fn get_owner(env: Env) -> Result<Address, CrowdsaleError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(CrowdsaleError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OWNER)
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&ADMIN)
    }

    pub fn get_pricing_strategy(env: Env) -> Result<Address, CrowdsaleError> {
        env.storage()
            .instance()
            .get(&PRICING)
            .ok_or(CrowdsaleError::NotInitialized)
    }

    pub fn total_raised(env: Env) -> i128 {
        Self::counter(&env, &TOTAL_RAISED)
    }

    pub fn tokens_sold(env: Env) -> i128 {
        Self::counter(&env, &TOKENS_SOLD)
    }

    pub fn investor_count(env: Env) -> u32 {
        env.storage().instance().get(&INVESTOR_COUNT).unwrap_or(0)
    }

    pub fn invested_amount_of(env: Env, investor: Address) -> i128 {
        ledger::invested_of(&env, &investor)
    }

    pub fn refundable_amount_of(env: Env, investor: Address) -> i128 {
        ledger::refundable_of(&env, &investor)
    }

    pub fn tokens_issued_to(env: Env, investor: Address) -> i128 {
        ledger::tokens_of(&env, &investor)
    }

    pub fn is_early_participant(env: Env, account: Address) -> bool {
        ledger::is_early_participant(&env, &account)
    }

    /// Payment currency currently held for refunds.
    pub fn refund_escrow(env: Env) -> i128 {
        Self::counter(&env, &REFUND_ESCROW)
    }

    pub fn total_refunded(env: Env) -> i128 {
        Self::counter(&env, &TOTAL_REFUNDED)
    }

    pub fn is_finalized(env: Env) -> bool {
        env.storage().instance().get(&FINALIZED).unwrap_or(false)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    /// Rate of the tier the next contribution would start in.
    pub fn current_rate(env: Env) -> Result<RateInfo, CrowdsaleError> {
        let config = Self::load_config(&env)?;
        let raised = Self::effective_raised(&env, &config)?;
        let pricing = PricingStrategyClient::new(&env, &Self::get_pricing_strategy(env.clone())?);
        match pricing.try_current_rate(&raised) {
            Ok(Ok(info)) => Ok(info),
            Err(Ok(err)) => Err(err),
            _ => Err(CrowdsaleError::InvalidConfiguration),
        }
    }

    /// Tokens `amount` would buy right now. Writes nothing.
    pub fn preview_token_amount(env: Env, amount: i128) -> Result<i128, CrowdsaleError> {
        let config = Self::load_config(&env)?;
        if amount <= 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }
        Self::price(&env, &config, amount)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn validate_config(config: &CampaignConfig) -> Result<(), CrowdsaleError> {
        let whitelisted_minimum_ok = match config.whitelisted_minimum {
            Some(minimum) => minimum >= 0,
            None => true,
        };
        if config.start_time >= config.end_time
            || config.maximum_goal <= 0
            || config.minimum_goal < 0
            || config.minimum_goal > config.maximum_goal
            || config.minimum_contribution < 0
            || !whitelisted_minimum_ok
            || config.pricing_baseline < 0
            || config.token == config.payment_token
        {
            return Err(CrowdsaleError::InvalidConfiguration);
        }
        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), CrowdsaleError> {
        if !env.storage().instance().has(&CONFIG) {
            return Err(CrowdsaleError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), CrowdsaleError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(CrowdsaleError::NotInitialized)?;
        if *caller != owner {
            return Err(CrowdsaleError::Unauthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<CampaignConfig, CrowdsaleError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(CrowdsaleError::NotInitialized)
    }

    fn counter(env: &Env, key: &Symbol) -> i128 {
        env.storage().instance().get(key).unwrap_or(0)
    }

    fn current_phase(env: &Env, config: &CampaignConfig) -> Phase {
        let snapshot = phase::Snapshot {
            start_time: config.start_time,
            end_time: config.end_time,
            minimum_goal: config.minimum_goal,
            maximum_goal: config.maximum_goal,
            total_raised: Self::counter(env, &TOTAL_RAISED),
            refund_loaded: Self::counter(env, &REFUND_LOADED) > 0,
            finalized: env.storage().instance().get(&FINALIZED).unwrap_or(false),
        };
        phase::derive(&snapshot, env.ledger().timestamp())
    }

    fn effective_raised(env: &Env, config: &CampaignConfig) -> Result<i128, CrowdsaleError> {
        config
            .pricing_baseline
            .checked_add(Self::counter(env, &TOTAL_RAISED))
            .ok_or(CrowdsaleError::Overflow)
    }

    fn price(env: &Env, config: &CampaignConfig, amount: i128) -> Result<i128, CrowdsaleError> {
        let raised = Self::effective_raised(env, config)?;
        let strategy: Address = env
            .storage()
            .instance()
            .get(&PRICING)
            .ok_or(CrowdsaleError::NotInitialized)?;
        match PricingStrategyClient::new(env, &strategy).try_calculate_token_amount(&amount, &raised) {
            Ok(Ok(tokens)) => Ok(tokens),
            Err(Ok(err)) => Err(err),
            _ => Err(CrowdsaleError::InvalidConfiguration),
        }
    }

    /// Rejects a contribution that cannot be accepted in the current phase.
    fn check_acceptance(
        env: &Env,
        config: &CampaignConfig,
        investor: &Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError> {
        if amount <= 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }

        let early = ledger::is_early_participant(env, investor);
        match Self::current_phase(env, config) {
            Phase::Pending if !early => return Err(CrowdsaleError::NotStarted),
            Phase::Ended | Phase::Refunding | Phase::Finalized => {
                return Err(CrowdsaleError::Ended)
            }
            Phase::HardCapReached => return Err(CrowdsaleError::HardCapReached),
            _ => {}
        }

        if amount < config.minimum_contribution {
            return Err(CrowdsaleError::BelowMinimum);
        }
        if let (true, Some(minimum)) = (early, config.whitelisted_minimum) {
            if amount < minimum {
                return Err(CrowdsaleError::BelowMinimum);
            }
        }

        let raised = Self::counter(env, &TOTAL_RAISED);
        match raised.checked_add(amount) {
            Some(total) if total <= config.maximum_goal => Ok(()),
            _ => Err(CrowdsaleError::CapExceeded),
        }
    }

    /// Shared path of `contribute` and `register_payment`. Every check and
    /// every sum is computed before the first write.
    fn purchase(
        env: &Env,
        investor: &Address,
        amount: i128,
        paid_on_ledger: bool,
    ) -> Result<i128, CrowdsaleError> {
        let config = Self::load_config(env)?;
        Self::check_acceptance(env, &config, investor, amount)?;

        let tokens = Self::price(env, &config, amount)?;
        let entry = ledger::preview(env, investor, amount, tokens, paid_on_ledger)?;
        let raised = Self::counter(env, &TOTAL_RAISED)
            .checked_add(amount)
            .ok_or(CrowdsaleError::Overflow)?;
        let sold = Self::counter(env, &TOKENS_SOLD)
            .checked_add(tokens)
            .ok_or(CrowdsaleError::Overflow)?;

        let this = env.current_contract_address();
        let gated = GatedTokenClient::new(env, &config.token);
        match gated.try_transfer_from(&this, &config.token_treasury, investor, &tokens) {
            Ok(Ok(())) => {}
            _ => return Err(CrowdsaleError::TransferDenied),
        }
        if config.lock_buyers {
            match gated.try_add_to_time_locked_list(&this, investor) {
                Ok(Ok(())) => {}
                Err(Ok(err)) => return Err(err),
                _ => return Err(CrowdsaleError::TransferDenied),
            }
        }

        if paid_on_ledger {
            token::Client::new(env, &config.payment_token).transfer(
                investor,
                &config.beneficiary,
                &amount,
            );
        }

        ledger::store(env, investor, &entry);
        env.storage().instance().set(&TOTAL_RAISED, &raised);
        env.storage().instance().set(&TOKENS_SOLD, &sold);
        if entry.first_contribution {
            let count = Self::investor_count(env.clone()).saturating_add(1);
            env.storage().instance().set(&INVESTOR_COUNT, &count);
        }
        ttl::extend_instance(env);

        events::publish_contribution(env, investor.clone(), amount, tokens, raised, !paid_on_ledger);

        Ok(tokens)
    }
}

#[cfg(test)]
mod test_admin;
#[cfg(test)]
mod test_refund;
