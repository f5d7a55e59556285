//! Staged view of the facility used by every entry point.
//!
//! `Facility::load` reads config and state once; operations mutate the staged
//! `FacilityState` through `&mut self` and `commit` writes it back. Soroban
//! discards every write of an invocation that fails, so state is only ever
//! observable as committed by a successful call.

use soroban_sdk::{token, Address, Env};

use crate::ledger::clamped_sub;
use crate::ports::{TreasuryClient, YieldVaultClient};
use crate::storage::{read_collaborators, read_state, read_terms, write_state};
use crate::types::{ClearinghouseError, Collaborators, FacilityState, Terms};

pub(crate) struct Facility {
    pub env: Env,
    pub this: Address,
    pub collaborators: Collaborators,
    pub terms: Terms,
    pub state: FacilityState,
}

impl Facility {
    pub fn load(env: &Env) -> Result<Self, ClearinghouseError> {
        Ok(Facility {
            env: env.clone(),
            this: env.current_contract_address(),
            collaborators: read_collaborators(env)?,
            terms: read_terms(env)?,
            state: read_state(env)?,
        })
    }

    pub fn commit(self) {
        write_state(&self.env, &self.state);
    }

    pub fn collateral_token(&self) -> token::Client<'_> {
        token::Client::new(&self.env, &self.collaborators.collateral)
    }

    pub fn debt_token(&self) -> token::Client<'_> {
        token::Client::new(&self.env, &self.collaborators.debt)
    }

    pub fn vault(&self) -> YieldVaultClient<'_> {
        YieldVaultClient::new(&self.env, &self.collaborators.vault)
    }

    pub fn treasury(&self) -> TreasuryClient<'_> {
        TreasuryClient::new(&self.env, &self.collaborators.treasury)
    }

    /// Grants `spender` an allowance over this facility's `token` for the current ledger.
    pub fn approve(&self, token: &Address, spender: &Address, amount: i128) {
        let expiration_ledger = self.env.ledger().sequence();
        token::Client::new(&self.env, token).approve(&self.this, spender, &amount, &expiration_ledger);
    }

    /// Debt this facility owes the treasury, in debt-token units.
    pub fn treasury_debt(&self) -> i128 {
        self.treasury()
            .reserve_debt(&self.collaborators.debt, &self.this)
    }

    pub fn increase_treasury_debt(&self, amount: i128) -> Result<i128, ClearinghouseError> {
        let debt = self
            .treasury_debt()
            .checked_add(amount)
            .ok_or(ClearinghouseError::Overflow)?;
        self.treasury()
            .set_debt(&self.this, &self.collaborators.debt, &debt);
        Ok(debt)
    }

    /// Reduces the treasury debt record by `amount`, floored at zero.
    pub fn decrease_treasury_debt(&self, amount: i128) -> i128 {
        let debt = clamped_sub(self.treasury_debt(), amount);
        self.treasury()
            .set_debt(&self.this, &self.collaborators.debt, &debt);
        debt
    }
}
