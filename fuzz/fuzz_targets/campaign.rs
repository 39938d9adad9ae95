#![no_main]

use arbitrary::Arbitrary;
use campaign::{CampaignConfig, CampaignContract, CampaignContractClient};
use common::Tier;
use gated_token::{GatedTokenContract, GatedTokenContractClient, TokenConfig};
use libfuzzer_sys::fuzz_target;
use pricing::{PricingStrategyContract, PricingStrategyContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env, String, Vec,
};

const START: u64 = 1_000;
const END: u64 = 2_000;
const MAX_GOAL: i128 = 1_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Contribute { investor: u8, amount: i64 },
    Register { investor: u8, amount: i64 },
    Whitelist { investor: u8, allowed: bool },
    LoadRefund { amount: i64 },
    Refund { investor: u8 },
    Finalize,
    Advance { seconds: u16 },
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let payment_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let minter = StellarAssetClient::new(&env, &payment_id);

    let treasury = Address::generate(&env);
    let token_id = env.register(GatedTokenContract, ());
    let token = GatedTokenContractClient::new(&env, &token_id);
    token.initialize(
        &treasury,
        &TokenConfig {
            name: String::from_str(&env, "Fuzz"),
            symbol: String::from_str(&env, "FZZ"),
            decimals: 7,
            total_supply: i128::MAX,
            ico_start_time: START,
            ico_end_time: END,
            presale_lock_duration: 0,
            founders: Vec::new(&env),
        },
    );

    let mut tiers = Vec::new(&env);
    tiers.push_back(Tier { threshold: 10_000, rate: 1_000 });
    tiers.push_back(Tier { threshold: MAX_GOAL, rate: 10 });
    let pricing_id = env.register(PricingStrategyContract, ());
    PricingStrategyContractClient::new(&env, &pricing_id).initialize(&tiers);

    let contract_id = env.register(CampaignContract, ());
    let client = CampaignContractClient::new(&env, &contract_id);
    token.set_sale_address(&treasury, &contract_id);
    token.approve(&treasury, &contract_id, &i128::MAX);

    let owner = Address::generate(&env);
    let admin = Address::generate(&env);
    let beneficiary = Address::generate(&env);
    client.initialize(
        &owner,
        &CampaignConfig {
            start_time: START,
            end_time: END,
            beneficiary: beneficiary.clone(),
            minimum_goal: MAX_GOAL / 2,
            maximum_goal: MAX_GOAL,
            minimum_contribution: 1,
            whitelisted_minimum: Some(100),
            token: token_id,
            token_treasury: treasury,
            payment_token: payment_id.clone(),
            lock_buyers: true,
            pricing_baseline: 0,
        },
        &pricing_id,
    );
    client.set_admin(&owner, &admin);

    let mut investors = std::vec::Vec::new();
    for _ in 0..4 {
        let investor = Address::generate(&env);
        minter.mint(&investor, &(i64::MAX as i128));
        investors.push(investor);
    }
    minter.mint(&beneficiary, &(i64::MAX as i128));

    let mut now = 0u64;
    for action in actions {
        match action {
            FuzzAction::Contribute { investor, amount } => {
                let investor = &investors[investor as usize % investors.len()];
                let _ = client.try_contribute(investor, &(amount as i128));
            }
            FuzzAction::Register { investor, amount } => {
                let investor = &investors[investor as usize % investors.len()];
                let _ = client.try_register_payment(&admin, investor, &(amount as i128));
            }
            FuzzAction::Whitelist { investor, allowed } => {
                let investor = &investors[investor as usize % investors.len()];
                let _ = client.try_edit_early_participant_whitelist(&owner, investor, &allowed);
            }
            FuzzAction::LoadRefund { amount } => {
                let _ = client.try_load_refund(&beneficiary, &(amount as i128));
            }
            FuzzAction::Refund { investor } => {
                let investor = &investors[investor as usize % investors.len()];
                let _ = client.try_refund(investor);
            }
            FuzzAction::Finalize => {
                let _ = client.try_finalize(&owner);
            }
            FuzzAction::Advance { seconds } => {
                now = now.saturating_add(seconds as u64);
                env.ledger().set_timestamp(now);
            }
        }

        assert!(client.total_raised() <= MAX_GOAL);
        assert!(client.refund_escrow() >= 0);
    }
});
