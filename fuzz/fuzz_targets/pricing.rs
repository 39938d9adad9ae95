#![no_main]

use arbitrary::Arbitrary;
use common::Tier;
use libfuzzer_sys::fuzz_target;
use pricing::{PricingStrategyContract, PricingStrategyContractClient};
use soroban_sdk::{Env, Vec};

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    tiers: std::vec::Vec<(i64, i64)>,
    queries: std::vec::Vec<(i64, i64)>,
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    let contract_id = env.register(PricingStrategyContract, ());
    let client = PricingStrategyContractClient::new(&env, &contract_id);

    let mut tiers = Vec::new(&env);
    for (threshold, rate) in input.tiers.iter().take(16) {
        tiers.push_back(Tier {
            threshold: *threshold as i128,
            rate: *rate as i128,
        });
    }
    // Invalid tables must be rejected, never panic.
    if client.try_initialize(&tiers).is_err() {
        return;
    }

    for (contribution, raised) in input.queries.iter().take(32) {
        let contribution = *contribution as i128;
        let raised = *raised as i128;
        if let Ok(Ok(tokens)) = client.try_calculate_token_amount(&contribution, &raised) {
            assert!(tokens >= 0);
            if contribution > 0 {
                assert!(tokens > 0);
            }
        }
        let _ = client.try_current_rate(&raised);
    }
});
