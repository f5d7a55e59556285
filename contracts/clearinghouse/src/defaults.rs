//! Batched default claims with the keeper reward.

use soroban_sdk::{log, Address, Env, Vec};

use crate::events::{publish_default_claim, DefaultClaimEvent};
use crate::facility::Facility;
use crate::ports::CoolerClient;
use crate::pricing::keeper_reward;
use crate::types::ClearinghouseError;

impl Facility {
    /// Claims every `(coolers[i], loan_ids[i])` default and pays the keeper.
    ///
    /// The whole batch fails if any loan is not from the factory or not lent by
    /// this facility. Seized totals are written off the ledger and the treasury
    /// debt in aggregate, each clamped at zero; treasury debt only drops by
    /// principal. All collateral held afterwards is burned.
    pub fn claim_defaulted(
        &mut self,
        keeper: &Address,
        coolers: &Vec<Address>,
        loan_ids: &Vec<u32>,
    ) -> Result<i128, ClearinghouseError> {
        if coolers.len() != loan_ids.len() {
            return Err(ClearinghouseError::LengthDiscrepancy);
        }

        let mut total_principal: i128 = 0;
        let mut total_interest: i128 = 0;
        let mut total_collateral: i128 = 0;
        let mut keeper_rewards: i128 = 0;

        for (cooler_address, loan_id) in coolers.iter().zip(loan_ids.iter()) {
            self.require_from_factory(&cooler_address)?;
            let cooler = CoolerClient::new(&self.env, &cooler_address);
            self.require_lender(&cooler, loan_id)?;

            let claim = cooler.claim_defaulted(&loan_id);
            total_principal = total_principal
                .checked_add(claim.principal)
                .ok_or(ClearinghouseError::Overflow)?;
            total_interest = total_interest
                .checked_add(claim.interest)
                .ok_or(ClearinghouseError::Overflow)?;
            total_collateral = total_collateral
                .checked_add(claim.collateral)
                .ok_or(ClearinghouseError::Overflow)?;
            keeper_rewards = keeper_rewards
                .checked_add(keeper_reward(&self.env, &self.terms, claim.collateral, claim.elapsed))
                .ok_or(ClearinghouseError::Overflow)?;
        }

        self.state
            .receivables
            .record_settlement(total_principal, total_interest);
        self.decrease_treasury_debt(total_principal);

        if keeper_rewards > 0 {
            self.collateral_token()
                .transfer(&self.this, keeper, &keeper_rewards);
        }
        log!(&self.env, "claimed {} defaults, keeper reward {}", coolers.len(), keeper_rewards);
        self.burn();

        publish_default_claim(
            &self.env,
            DefaultClaimEvent {
                keeper: keeper.clone(),
                loans: coolers.len(),
                principal: total_principal,
                interest: total_interest,
                collateral: total_collateral,
                keeper_reward: keeper_rewards,
            },
        );
        Ok(keeper_rewards)
    }
}
