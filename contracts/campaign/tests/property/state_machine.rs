#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the campaign.
//!
//! Invariants tested:
//! - `total_raised` never exceeds the maximum goal
//! - `total_raised` equals the sum of every investor's invested amount
//! - `tokens_sold` equals the tokens each investor actually holds
//! - The beneficiary holds exactly the refundable (on-ledger) contributions
//! - A rejected action leaves the totals untouched
//! - Refunding a failed campaign returns every wallet to its starting balance

use campaign::{CampaignConfig, CampaignContract, CampaignContractClient};
use common::Tier;
use gated_token::{GatedTokenContract, GatedTokenContractClient, TokenConfig};
use pricing::{PricingStrategyContract, PricingStrategyContractClient};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env, String, Vec};

// ── Helpers ───────────────────────────────────────────────────────────────────

const START: u64 = 10_000;
const END: u64 = 20_000;
const MIN_GOAL: i128 = 300;
const MAX_GOAL: i128 = 1_000;
const WALLET: i128 = 5_000;
const INVESTORS: usize = 4;

#[derive(Clone, Debug, Arbitrary)]
enum Action {
    Contribute {
        #[proptest(strategy = "0..INVESTORS")]
        investor: usize,
        #[proptest(strategy = "-20i128..400")]
        amount: i128,
    },
    Register {
        #[proptest(strategy = "0..INVESTORS")]
        investor: usize,
        #[proptest(strategy = "-20i128..400")]
        amount: i128,
    },
    Whitelist {
        #[proptest(strategy = "0..INVESTORS")]
        investor: usize,
    },
    Advance {
        #[proptest(strategy = "0u64..4_000")]
        seconds: u64,
    },
}

struct World {
    env: Env,
    client: CampaignContractClient<'static>,
    token: GatedTokenContractClient<'static>,
    payment: TokenClient<'static>,
    owner: Address,
    admin: Address,
    beneficiary: Address,
    investors: std::vec::Vec<Address>,
}

fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START - 1_000);

    let payment_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let treasury = Address::generate(&env);
    let token_id = env.register(GatedTokenContract, ());
    let token = GatedTokenContractClient::new(&env, &token_id);
    token.initialize(
        &treasury,
        &TokenConfig {
            name: String::from_str(&env, "Tier Token"),
            symbol: String::from_str(&env, "TIER"),
            decimals: 7,
            total_supply: 1_000_000,
            ico_start_time: START,
            ico_end_time: END,
            presale_lock_duration: 0,
            founders: Vec::new(&env),
        },
    );

    let mut tiers = Vec::new(&env);
    tiers.push_back(Tier { threshold: 250, rate: 3 });
    tiers.push_back(Tier { threshold: 600, rate: 2 });
    tiers.push_back(Tier { threshold: 1_000, rate: 1 });
    let pricing_id = env.register(PricingStrategyContract, ());
    PricingStrategyContractClient::new(&env, &pricing_id).initialize(&tiers);

    let contract_id = env.register(CampaignContract, ());
    let client = CampaignContractClient::new(&env, &contract_id);
    token.set_sale_address(&treasury, &contract_id);
    token.approve(&treasury, &contract_id, &1_000_000);

    let owner = Address::generate(&env);
    let admin = Address::generate(&env);
    let beneficiary = Address::generate(&env);
    client.initialize(
        &owner,
        &CampaignConfig {
            start_time: START,
            end_time: END,
            beneficiary: beneficiary.clone(),
            minimum_goal: MIN_GOAL,
            maximum_goal: MAX_GOAL,
            minimum_contribution: 5,
            whitelisted_minimum: Some(50),
            token: token_id,
            token_treasury: treasury,
            payment_token: payment_id.clone(),
            lock_buyers: false,
            pricing_baseline: 0,
        },
        &pricing_id,
    );
    client.set_admin(&owner, &admin);

    let minter = StellarAssetClient::new(&env, &payment_id);
    let mut investors = std::vec::Vec::new();
    for _ in 0..INVESTORS {
        let investor = Address::generate(&env);
        minter.mint(&investor, &WALLET);
        investors.push(investor);
    }

    let payment = TokenClient::new(&env, &payment_id);
    World {
        env,
        client,
        token,
        payment,
        owner,
        admin,
        beneficiary,
        investors,
    }
}

fn totals(world: &World) -> (i128, i128, u32) {
    (
        world.client.total_raised(),
        world.client.tokens_sold(),
        world.client.investor_count(),
    )
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of contributions, registrations, whitelist edits and
    /// clock moves keeps the ledger consistent with the token and payment
    /// balances.
    #[test]
    fn prop_ledger_stays_consistent(actions in prop::collection::vec(any::<Action>(), 1..24)) {
        let world = setup();
        let mut now = START - 1_000;

        for action in actions {
            let before = totals(&world);
            let accepted = match action {
                Action::Contribute { investor, amount } => world
                    .client
                    .try_contribute(&world.investors[investor], &amount)
                    .is_ok(),
                Action::Register { investor, amount } => world
                    .client
                    .try_register_payment(&world.admin, &world.investors[investor], &amount)
                    .is_ok(),
                Action::Whitelist { investor } => {
                    world.client.edit_early_participant_whitelist(
                        &world.owner,
                        &world.investors[investor],
                        &true,
                    );
                    false
                }
                Action::Advance { seconds } => {
                    now += seconds;
                    world.env.ledger().set_timestamp(now);
                    false
                }
            };

            if !accepted {
                prop_assert_eq!(totals(&world), before);
            }

            let raised = world.client.total_raised();
            prop_assert!(raised <= MAX_GOAL);

            let mut invested = 0i128;
            let mut refundable = 0i128;
            let mut held = 0i128;
            for investor in &world.investors {
                invested += world.client.invested_amount_of(investor);
                refundable += world.client.refundable_amount_of(investor);
                prop_assert_eq!(
                    world.client.tokens_issued_to(investor),
                    world.token.balance(investor)
                );
                held += world.token.balance(investor);
            }
            prop_assert_eq!(invested, raised);
            prop_assert_eq!(held, world.client.tokens_sold());
            prop_assert_eq!(world.payment.balance(&world.beneficiary), refundable);
        }
    }

    /// Every on-ledger contribution to a campaign that misses its goal comes
    /// back in full once the beneficiary loads the escrow.
    #[test]
    fn prop_refunds_restore_wallets(amounts in prop::collection::vec(5i128..70, 1..=INVESTORS)) {
        let world = setup();
        world.env.ledger().set_timestamp(START);

        let mut raised = 0i128;
        for (investor, amount) in world.investors.iter().zip(amounts.iter()) {
            world.client.contribute(investor, amount);
            raised += amount;
        }
        prop_assert!(raised < MIN_GOAL);

        world.env.ledger().set_timestamp(END);
        world.client.load_refund(&world.beneficiary, &raised);

        for (investor, amount) in world.investors.iter().zip(amounts.iter()) {
            prop_assert_eq!(world.client.refund(investor), *amount);
            prop_assert_eq!(world.payment.balance(investor), WALLET);
        }
        prop_assert_eq!(world.client.refund_escrow(), 0);
        prop_assert_eq!(world.client.total_refunded(), raised);
    }
}
