//! Receivables ledger: principal and interest owed by loans this facility wrote.
//!
//! Decrements are clamped at zero so that rounding drift between the facility
//! and its escrows can never block a repayment or a default claim.

use crate::types::Receivables;

/// `balance - amount`, floored at zero.
pub fn clamped_sub(balance: i128, amount: i128) -> i128 {
    if balance > amount {
        balance - amount
    } else {
        0
    }
}

impl Receivables {
    pub fn total(&self) -> i128 {
        self.principal.saturating_add(self.interest)
    }

    pub fn record_origination(&mut self, principal: i128, interest: i128) {
        self.principal = self.principal.saturating_add(principal);
        self.interest = self.interest.saturating_add(interest);
    }

    /// Repayments and default write-offs share the same clamped decrement.
    pub fn record_settlement(&mut self, principal: i128, interest: i128) {
        self.principal = clamped_sub(self.principal, principal);
        self.interest = clamped_sub(self.interest, interest);
    }
}
