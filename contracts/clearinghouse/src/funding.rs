//! Working capital management: rebalancing against the treasury, sweeping idle
//! debt tokens, manual defunding and burning of seized collateral.

use soroban_sdk::{log, token, Address, Env};

use crate::events::{publish_burn, publish_defund, publish_rebalance, BurnEvent, DefundEvent, RebalanceEvent};
use crate::facility::Facility;
use crate::ports::{MintAuthorityClient, StakingClient};
use crate::types::{ClearinghouseError, RebalanceDirection};

impl Facility {
    /// Ceiling on working capital: the fund amount while active, zero otherwise.
    pub fn funding_ceiling(&self) -> i128 {
        if self.state.funding.active {
            self.terms.fund_amount
        } else {
            0
        }
    }

    /// Trades vault shares with the treasury so that withdrawable working capital
    /// matches the ceiling. Returns `false` without side effects when not yet due.
    ///
    /// `fund_time` advances by exactly one cadence per run, however late the call.
    pub fn rebalance(&mut self) -> Result<bool, ClearinghouseError> {
        let now = self.env.ledger().timestamp();
        if self.state.funding.fund_time > now {
            log!(&self.env, "rebalance not due until {}", self.state.funding.fund_time);
            return Ok(false);
        }
        self.state.funding.fund_time = self
            .state
            .funding
            .fund_time
            .checked_add(self.terms.fund_cadence)
            .ok_or(ClearinghouseError::Overflow)?;

        // Idle funds always enter the vault here; any excess over the ceiling
        // is then returned below with the matching debt reduction.
        let idle = self.debt_token().balance(&self.this);
        self.deposit(idle);

        let reserve = self.vault().max_withdraw(&self.this);
        let ceiling = self.funding_ceiling();
        if reserve < ceiling {
            let fund_amount = ceiling - reserve;
            let treasury_debt = self.increase_treasury_debt(fund_amount)?;
            let shares = self.vault().preview_withdraw(&fund_amount);
            let treasury = self.treasury();
            treasury.increase_withdraw_approval(&self.this, &self.collaborators.vault, &shares);
            treasury.withdraw_reserves(&self.this, &self.collaborators.vault, &shares);
            log!(&self.env, "rebalance funded {} ({} shares)", fund_amount, shares);
            publish_rebalance(
                &self.env,
                RebalanceEvent {
                    direction: RebalanceDirection::Fund,
                    amount: fund_amount,
                    treasury_debt,
                    next_fund_time: self.state.funding.fund_time,
                },
            );
        } else if reserve > ceiling {
            let defund_amount = reserve - ceiling;
            let treasury_debt = self.decrease_treasury_debt(defund_amount);
            let shares = self.vault().preview_withdraw(&defund_amount);
            self.vault()
                .transfer(&self.this, &self.collaborators.treasury, &shares);
            log!(&self.env, "rebalance defunded {} ({} shares)", defund_amount, shares);
            publish_rebalance(
                &self.env,
                RebalanceEvent {
                    direction: RebalanceDirection::Defund,
                    amount: defund_amount,
                    treasury_debt,
                    next_fund_time: self.state.funding.fund_time,
                },
            );
        }
        Ok(true)
    }

    /// Deposits `amount` debt tokens held by the facility into the vault.
    fn deposit(&self, amount: i128) {
        if amount == 0 {
            return;
        }
        self.approve(&self.collaborators.debt, &self.collaborators.vault, amount);
        self.vault().deposit(&self.this, &amount, &self.this);
    }

    /// Routes `amount` debt tokens held by the facility into working capital:
    /// deposited into the vault while active, otherwise defunded to the treasury
    /// so the treasury debt record drops with it.
    pub fn sweep(&self, amount: i128) -> Result<(), ClearinghouseError> {
        if amount == 0 {
            return Ok(());
        }
        if self.state.funding.active {
            self.deposit(amount);
            Ok(())
        } else {
            self.defund(&self.collaborators.debt, amount)
        }
    }

    /// Returns `amount` of `token` to the treasury. Debt and vault shares reduce
    /// the treasury debt record by their debt-token value.
    pub fn defund(&self, token: &Address, amount: i128) -> Result<(), ClearinghouseError> {
        if *token == self.collaborators.collateral {
            return Err(ClearinghouseError::OnlyBurnable);
        }
        if *token == self.collaborators.vault || *token == self.collaborators.debt {
            let debt_amount = if *token == self.collaborators.vault {
                self.vault().preview_redeem(&amount)
            } else {
                amount
            };
            self.decrease_treasury_debt(debt_amount);
        }
        token::Client::new(&self.env, token).transfer(&self.this, &self.collaborators.treasury, &amount);
        publish_defund(
            &self.env,
            DefundEvent {
                token: token.clone(),
                amount,
            },
        );
        Ok(())
    }

    /// Unstakes every collateral unit held by the facility and burns the proceeds.
    /// Returns the amount burned.
    pub fn burn(&self) -> i128 {
        let collateral = self.collateral_token().balance(&self.this);
        if collateral == 0 {
            return 0;
        }
        self.approve(&self.collaborators.collateral, &self.collaborators.staking, collateral);
        let burnable = StakingClient::new(&self.env, &self.collaborators.staking).unstake(
            &self.this,
            &collateral,
            &false,
            &false,
        );
        if burnable > 0 {
            self.approve(&self.collaborators.ohm, &self.collaborators.minter, burnable);
            MintAuthorityClient::new(&self.env, &self.collaborators.minter).burn_ohm(&self.this, &burnable);
        }
        log!(&self.env, "burned {} from {} collateral", burnable, collateral);
        publish_burn(
            &self.env,
            BurnEvent {
                collateral,
                burned: burnable,
            },
        );
        burnable
    }
}
