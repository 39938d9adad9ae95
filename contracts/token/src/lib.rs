#![no_std]

pub mod accounts;
pub mod events;
pub mod gate;

use common::{ttl, CrowdsaleError, FounderLock, GatedTokenInterface, LockClass};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Vec,
};

use gate::{GatePolicy, Recipient, Sender};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const CONFIG: Symbol = symbol_short!("CONFIG");
const ACTIVATED: Symbol = symbol_short!("ACTIVE");
const SALE_ADDRESS: Symbol = symbol_short!("SALE");

const MAX_DECIMALS: u32 = 18;

// ── Public-facing types ──────────────────────────────────────────────────────

/// Construction parameters of the token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Whole supply, minted to the owner at construction.
    pub total_supply: i128,
    pub ico_start_time: u64,
    /// Anchor for every vesting horizon.
    pub ico_end_time: u64,
    /// Seconds after `ico_end_time` that presale buyers stay locked.
    pub presale_lock_duration: u64,
    pub founders: Vec<FounderLock>,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct GatedTokenContract;

#[contractimpl]
impl GatedTokenContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Create the token: mint the whole supply to `owner`, whitelist the
    /// owner for pre-activation distribution and classify every founder.
    pub fn initialize(env: Env, owner: Address, config: TokenConfig) -> Result<(), CrowdsaleError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(CrowdsaleError::AlreadyInitialized);
        }
        Self::validate_config(&owner, &config)?;

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&ACTIVATED, &false);
        ttl::extend_instance(&env);

        accounts::set_balance(&env, &owner, config.total_supply);
        accounts::set_whitelisted(&env, &owner, true);
        for founder in config.founders.iter() {
            accounts::classify(
                &env,
                &founder.account,
                LockClass::Founder(founder.vesting_duration),
            );
        }

        events::publish_initialized(
            &env,
            owner,
            config.total_supply,
            config.ico_end_time,
            config.founders.len(),
        );

        Ok(())
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        Self::move_tokens(&env, &from, &to, amount)
    }

    /// Set the amount `spender` may move out of `from`. Approvals are not
    /// gated; only the eventual transfer is.
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount < 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }

        accounts::set_allowance(&env, &from, &spender, amount);
        events::publish_approval(&env, from, spender, amount);

        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        accounts::balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        accounts::allowance(&env, &from, &spender)
    }

    /// Whether a transfer from `from` to `to` would pass the gate right now.
    pub fn can_transfer(env: Env, from: Address, to: Address) -> bool {
        match Self::load_policy(&env) {
            Ok(policy) => Self::check_gate(&env, &policy, &from, &to).is_ok(),
            Err(_) => false,
        }
    }

    // ── Owner administration ────────────────────────────────────────────────

    /// Open the token to general transfers. There is no way back.
    pub fn activate(env: Env, caller: Address) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if Self::is_activated(env.clone()) {
            return Ok(());
        }
        env.storage().instance().set(&ACTIVATED, &true);
        events::publish_activated(&env, caller);

        Ok(())
    }

    /// Grant or revoke pre-activation transfer rights.
    pub fn edit_whitelist(
        env: Env,
        caller: Address,
        account: Address,
        allowed: bool,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        accounts::set_whitelisted(&env, &account, allowed);
        events::publish_whitelist_edited(&env, account, allowed);

        Ok(())
    }

    /// Designate the one sale contract allowed to mark presale buyers.
    pub fn set_sale_address(env: Env, caller: Address, sale: Address) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&SALE_ADDRESS, &sale);
        events::publish_sale_address_set(&env, sale);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn total_supply(env: Env) -> Result<i128, CrowdsaleError> {
        Ok(Self::load_config(&env)?.total_supply)
    }

    pub fn name(env: Env) -> Result<String, CrowdsaleError> {
        Ok(Self::load_config(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, CrowdsaleError> {
        Ok(Self::load_config(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, CrowdsaleError> {
        Ok(Self::load_config(&env)?.decimals)
    }

    pub fn get_config(env: Env) -> Result<TokenConfig, CrowdsaleError> {
        Self::load_config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, CrowdsaleError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(CrowdsaleError::NotInitialized)
    }

    pub fn is_activated(env: Env) -> bool {
        env.storage().instance().get(&ACTIVATED).unwrap_or(false)
    }

    pub fn get_sale_address(env: Env) -> Option<Address> {
        env.storage().instance().get(&SALE_ADDRESS)
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        accounts::is_whitelisted(&env, &account)
    }

    pub fn get_lock_class(env: Env, account: Address) -> Option<LockClass> {
        accounts::lock_class(&env, &account)
    }

    pub fn is_presale_buyer(env: Env, account: Address) -> bool {
        matches!(
            accounts::lock_class(&env, &account),
            Some(LockClass::PresaleBuyer)
        )
    }

    pub fn is_founder(env: Env, account: Address) -> bool {
        matches!(
            accounts::lock_class(&env, &account),
            Some(LockClass::Founder(_))
        )
    }

    /// Timestamp from which `account` may send tokens, if it is locked at all.
    pub fn unlock_time(env: Env, account: Address) -> Result<Option<u64>, CrowdsaleError> {
        let policy = Self::load_policy(&env)?;
        Ok(accounts::lock_class(&env, &account).map(|class| gate::lock_expiry(&class, &policy)))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn validate_config(owner: &Address, config: &TokenConfig) -> Result<(), CrowdsaleError> {
        if config.total_supply <= 0
            || config.ico_start_time >= config.ico_end_time
            || config.decimals > MAX_DECIMALS
        {
            return Err(CrowdsaleError::InvalidConfiguration);
        }

        for (i, founder) in config.founders.iter().enumerate() {
            if founder.account == *owner {
                return Err(CrowdsaleError::InvalidConfiguration);
            }
            let duplicate = config
                .founders
                .iter()
                .skip(i + 1)
                .any(|other| other.account == founder.account);
            if duplicate {
                return Err(CrowdsaleError::InvalidConfiguration);
            }
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

    fn load_config(env: &Env) -> Result<TokenConfig, CrowdsaleError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(CrowdsaleError::NotInitialized)
    }

    fn load_policy(env: &Env) -> Result<GatePolicy, CrowdsaleError> {
        let config = Self::load_config(env)?;
        Ok(GatePolicy {
            activated: env.storage().instance().get(&ACTIVATED).unwrap_or(false),
            ico_end_time: config.ico_end_time,
            presale_lock_duration: config.presale_lock_duration,
        })
    }

    fn check_gate(
        env: &Env,
        policy: &GatePolicy,
        from: &Address,
        to: &Address,
    ) -> Result<(), CrowdsaleError> {
        let sender = Sender {
            whitelisted: accounts::is_whitelisted(env, from),
            lock: accounts::lock_class(env, from),
        };
        let recipient = Recipient {
            whitelisted: accounts::is_whitelisted(env, to),
        };
        gate::evaluate(policy, &sender, &recipient, env.ledger().timestamp())
    }

    /// Gate check, balance check, then the two balance writes.
    fn move_tokens(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), CrowdsaleError> {
        if amount < 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }

        let policy = Self::load_policy(env)?;
        Self::check_gate(env, &policy, from, to)?;

        let from_balance = accounts::balance(env, from);
        if from_balance < amount {
            return Err(CrowdsaleError::InsufficientBalance);
        }
        accounts::set_balance(env, from, from_balance - amount);

        // Read after the debit so a self-transfer nets to zero.
        let to_balance = accounts::balance(env, to)
            .checked_add(amount)
            .ok_or(CrowdsaleError::Overflow)?;
        accounts::set_balance(env, to, to_balance);

        events::publish_transfer(env, from.clone(), to.clone(), amount);

        Ok(())
    }
}

#[contractimpl]
impl GatedTokenInterface for GatedTokenContract {
    /// Move tokens out of `from` against `spender`'s allowance.
    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        spender.require_auth();

        if amount < 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }
        let allowed = accounts::allowance(&env, &from, &spender);
        if allowed < amount {
            return Err(CrowdsaleError::InsufficientAllowance);
        }

        Self::move_tokens(&env, &from, &to, amount)?;
        accounts::set_allowance(&env, &from, &spender, allowed - amount);

        Ok(())
    }

    /// Mark `account` as a presale buyer. Only the configured sale address
    /// may call this; founders keep their own classification.
    fn add_to_time_locked_list(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), CrowdsaleError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let sale: Address = env
            .storage()
            .instance()
            .get(&SALE_ADDRESS)
            .ok_or(CrowdsaleError::Unauthorized)?;
        if caller != sale {
            return Err(CrowdsaleError::Unauthorized);
        }

        if accounts::classify(&env, &account, LockClass::PresaleBuyer) {
            let policy = Self::load_policy(&env)?;
            let unlock_at = gate::lock_expiry(&LockClass::PresaleBuyer, &policy);
            events::publish_time_locked(&env, account, unlock_at);
        }

        Ok(())
    }
}
