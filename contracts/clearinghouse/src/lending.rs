//! Loan origination, extension and the repayment callback.

use soroban_sdk::Address;

use crate::events::{
    publish_extension, publish_origination, publish_repayment, ExtensionEvent, OriginationEvent,
    RepaymentEvent,
};
use crate::facility::Facility;
use crate::ports::{CoolerClient, CoolerFactoryClient};
use crate::pricing::{interest_for, loan_for_collateral};
use crate::types::ClearinghouseError;

impl Facility {
    /// Fails unless `cooler` was deployed by the trusted factory.
    pub fn require_from_factory(&self, cooler: &Address) -> Result<(), ClearinghouseError> {
        let factory = CoolerFactoryClient::new(&self.env, &self.collaborators.factory);
        if !factory.created(cooler) {
            return Err(ClearinghouseError::OnlyFromFactory);
        }
        Ok(())
    }

    /// Fails unless this facility is the recorded lender of `loan_id`.
    pub fn require_lender(&self, cooler: &CoolerClient, loan_id: u32) -> Result<(), ClearinghouseError> {
        if cooler.get_loan(&loan_id).lender != self.this {
            return Err(ClearinghouseError::NotLender);
        }
        Ok(())
    }

    /// Lends `amount` debt tokens through `cooler` against collateral pulled from
    /// `caller`. The request is opened and cleared in the same call.
    pub fn originate(
        &mut self,
        caller: &Address,
        cooler_address: &Address,
        amount: i128,
    ) -> Result<u32, ClearinghouseError> {
        if amount <= 0 {
            return Err(ClearinghouseError::InvalidAmount);
        }
        // Best effort: the result only says whether a rebalance was due.
        self.rebalance()?;

        self.require_from_factory(cooler_address)?;
        let cooler = CoolerClient::new(&self.env, cooler_address);
        if cooler.collateral() != self.collaborators.collateral || cooler.debt() != self.collaborators.debt {
            return Err(ClearinghouseError::BadEscrow);
        }

        let collateral = cooler.collateral_for(&amount, &self.terms.loan_to_collateral);
        self.collateral_token()
            .transfer(caller, &self.this, &collateral);

        let (_, interest) = loan_for_collateral(&self.env, &self.terms, collateral);
        self.state.receivables.record_origination(amount, interest);

        self.approve(&self.collaborators.collateral, cooler_address, collateral);
        let req_id = cooler.request_loan(
            &self.this,
            &amount,
            &self.terms.interest_rate,
            &self.terms.loan_to_collateral,
            &self.terms.duration,
        );

        self.vault().withdraw(&amount, &self.this, &self.this);
        self.approve(&self.collaborators.debt, cooler_address, amount);
        let loan_id = cooler.clear_request(&req_id, &self.this, &true);

        publish_origination(
            &self.env,
            OriginationEvent {
                cooler: cooler_address.clone(),
                loan_id,
                principal: amount,
                interest,
                collateral,
            },
        );
        Ok(loan_id)
    }

    /// Extends `loan_id` by `times` terms. `caller` prepays the extension interest
    /// on the remaining principal; principal is unchanged.
    pub fn extend(
        &mut self,
        caller: &Address,
        cooler_address: &Address,
        loan_id: u32,
        times: u32,
    ) -> Result<i128, ClearinghouseError> {
        if times == 0 {
            return Err(ClearinghouseError::InvalidAmount);
        }
        self.require_from_factory(cooler_address)?;
        let cooler = CoolerClient::new(&self.env, cooler_address);
        let loan = cooler.get_loan(&loan_id);
        if loan.lender != self.this {
            return Err(ClearinghouseError::NotLender);
        }

        let interest = interest_for(&self.env, &self.terms, loan.principal, loan.request.duration)
            .checked_mul(times as i128)
            .ok_or(ClearinghouseError::Overflow)?;
        if interest > 0 {
            self.debt_token().transfer(caller, &self.this, &interest);
            self.sweep(interest)?;
        }
        cooler.extend_loan_terms(&loan_id, &times);

        publish_extension(
            &self.env,
            ExtensionEvent {
                cooler: cooler_address.clone(),
                loan_id,
                times,
                interest_paid: interest,
            },
        );
        Ok(interest)
    }

    /// Books a repayment already transferred to this facility by `cooler`.
    pub fn on_repay(
        &mut self,
        cooler_address: &Address,
        loan_id: u32,
        principal_paid: i128,
        interest_paid: i128,
    ) -> Result<(), ClearinghouseError> {
        if principal_paid < 0 || interest_paid < 0 {
            return Err(ClearinghouseError::InvalidAmount);
        }
        self.require_from_factory(cooler_address)?;

        let received = principal_paid
            .checked_add(interest_paid)
            .ok_or(ClearinghouseError::Overflow)?;
        self.sweep(received)?;
        self.state
            .receivables
            .record_settlement(principal_paid, interest_paid);

        publish_repayment(
            &self.env,
            RepaymentEvent {
                cooler: cooler_address.clone(),
                loan_id,
                principal_paid,
                interest_paid,
            },
        );
        Ok(())
    }
}
