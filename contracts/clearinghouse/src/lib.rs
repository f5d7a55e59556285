#![no_std]

//! Clearinghouse contract: fixed-term, fixed-rate loans against collateral,
//! funded from a treasury up to a weekly replenished ceiling.
//!
//! # Atomicity
//! Each entry point loads the facility state once, mutates it in memory and
//! commits it at the end. Any error or collaborator failure aborts the whole
//! invocation and Soroban discards every write made by it, including writes
//! made by nested calls.
//!
//! # Reentrancy
//! Soroban rejects contract re-entry on its own. Mutating entry points still
//! hold a reentrancy guard so a collaborator calling back mid-operation fails.

mod defaults;
mod events;
mod facility;
mod funding;
mod ledger;
mod lending;
pub mod ports;
pub mod pricing;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use events::{
    BurnEvent, DefaultClaimEvent, DefundEvent, ExtensionEvent, LifecycleEvent, OriginationEvent,
    RebalanceEvent, RepaymentEvent,
};
pub use types::{
    ClearinghouseError, Collaborators, DefaultedClaim, FacilityState, FundingState, Loan,
    LoanRequest, RebalanceDirection, Receivables, Role, Terms,
};

use events::{publish_activated, publish_deactivated};
use facility::Facility;
use ports::{RegistryClient, YieldVaultClient};
use storage::{
    clear_reentrancy_guard, extend_instance_ttl, is_initialized, read_collaborators, read_state,
    read_terms, require_admin_auth, require_role, set_reentrancy_guard, write_admin,
    write_collaborators, write_role, write_state, write_terms,
};

#[contract]
pub struct Clearinghouse;

#[contractimpl]
impl Clearinghouse {
    /// Initialize with admin, collaborator addresses and lending terms.
    ///
    /// # Errors
    /// * `AlreadyInitialized` – called twice
    /// * `InvalidTerms` – any term is zero or negative
    /// * `IncompatibleCollaborator` – the vault does not wrap the debt token,
    ///   or collateral and debt are the same token
    pub fn init(
        env: Env,
        admin: Address,
        collaborators: Collaborators,
        terms: Terms,
    ) -> Result<(), ClearinghouseError> {
        if is_initialized(&env) {
            return Err(ClearinghouseError::AlreadyInitialized);
        }
        if !terms.is_valid() {
            return Err(ClearinghouseError::InvalidTerms);
        }
        if collaborators.collateral == collaborators.debt {
            return Err(ClearinghouseError::IncompatibleCollaborator);
        }
        let vault_asset = YieldVaultClient::new(&env, &collaborators.vault).asset();
        if vault_asset != collaborators.debt {
            return Err(ClearinghouseError::IncompatibleCollaborator);
        }

        write_admin(&env, &admin);
        write_collaborators(&env, &collaborators);
        write_terms(&env, &terms);
        write_state(
            &env,
            &FacilityState {
                receivables: Receivables::default(),
                funding: FundingState {
                    active: false,
                    fund_time: env.ledger().timestamp(),
                },
            },
        );
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Grant `role` to `account` (admin only).
    pub fn grant_role(env: Env, role: Role, account: Address) -> Result<(), ClearinghouseError> {
        require_admin_auth(&env)?;
        write_role(&env, role, &account, true);
        Ok(())
    }

    /// Revoke `role` from `account` (admin only).
    pub fn revoke_role(env: Env, role: Role, account: Address) -> Result<(), ClearinghouseError> {
        require_admin_auth(&env)?;
        write_role(&env, role, &account, false);
        Ok(())
    }

    /// Whether `account` currently holds `role`.
    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        storage::has_role(&env, role, &account)
    }

    // ── lending ──────────────────────────────────────────────────────────────

    /// Lend `amount` debt tokens through `cooler`, pulling the matching
    /// collateral from `caller`. Attempts a rebalance first. Returns the loan id.
    ///
    /// # Errors
    /// * `InvalidAmount` – `amount` <= 0
    /// * `OnlyFromFactory` – `cooler` was not deployed by the trusted factory
    /// * `BadEscrow` – `cooler` collateral/debt pair differs from this facility's
    pub fn originate(
        env: Env,
        caller: Address,
        cooler: Address,
        amount: i128,
    ) -> Result<u32, ClearinghouseError> {
        caller.require_auth();
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        let loan_id = facility.originate(&caller, &cooler, amount)?;
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(loan_id)
    }

    /// Extend `loan_id` by `times` terms; `caller` pays the extension interest.
    /// Returns the interest paid.
    pub fn extend(
        env: Env,
        caller: Address,
        cooler: Address,
        loan_id: u32,
        times: u32,
    ) -> Result<i128, ClearinghouseError> {
        caller.require_auth();
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        let interest = facility.extend(&caller, &cooler, loan_id, times)?;
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(interest)
    }

    /// Repayment callback, invoked by `cooler` after it forwarded the repaid
    /// debt tokens to this facility.
    pub fn on_repay(
        env: Env,
        cooler: Address,
        loan_id: u32,
        principal_paid: i128,
        interest_paid: i128,
    ) -> Result<(), ClearinghouseError> {
        cooler.require_auth();
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        facility.on_repay(&cooler, loan_id, principal_paid, interest_paid)?;
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Claim a batch of defaulted loans, paired by index. The keeper reward is
    /// paid to `keeper` in collateral and returned.
    ///
    /// # Errors
    /// * `LengthDiscrepancy` – `coolers` and `loan_ids` differ in length
    /// * `OnlyFromFactory` / `NotLender` – for any loan in the batch
    pub fn claim_defaulted(
        env: Env,
        keeper: Address,
        coolers: Vec<Address>,
        loan_ids: Vec<u32>,
    ) -> Result<i128, ClearinghouseError> {
        keeper.require_auth();
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        let reward = facility.claim_defaulted(&keeper, &coolers, &loan_ids)?;
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(reward)
    }

    // ── funding ──────────────────────────────────────────────────────────────

    /// Trade working capital with the treasury up or down to the ceiling.
    /// Returns `false` when the funding cadence has not elapsed yet.
    pub fn rebalance(env: Env) -> Result<bool, ClearinghouseError> {
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        let rebalanced = facility.rebalance()?;
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(rebalanced)
    }

    /// Route every idle debt token into working capital.
    pub fn sweep_into_vault(env: Env) -> Result<(), ClearinghouseError> {
        set_reentrancy_guard(&env)?;
        let facility = Facility::load(&env)?;
        let idle = facility.debt_token().balance(&facility.this);
        facility.sweep(idle)?;
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Burn all collateral held by the facility. Returns the amount burned.
    pub fn burn(env: Env) -> Result<i128, ClearinghouseError> {
        set_reentrancy_guard(&env)?;
        let facility = Facility::load(&env)?;
        let burned = facility.burn();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(burned)
    }

    // ── lifecycle ────────────────────────────────────────────────────────────

    /// Activate the facility (overseer only): restarts the funding cadence at
    /// the current time and registers with the registry.
    pub fn activate(env: Env, caller: Address) -> Result<(), ClearinghouseError> {
        require_role(&env, Role::Overseer, &caller)?;
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        if facility.state.funding.active {
            return Err(ClearinghouseError::AlreadyActive);
        }
        facility.state.funding.active = true;
        facility.state.funding.fund_time = env.ledger().timestamp();
        RegistryClient::new(&env, &facility.collaborators.registry).activate_clearinghouse(&facility.this);

        publish_activated(
            &env,
            LifecycleEvent {
                caller,
                active: true,
                fund_time: facility.state.funding.fund_time,
            },
        );
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Shut the facility down (emergency role only): returns all vault shares
    /// and idle debt tokens to the treasury and deregisters.
    pub fn emergency_shutdown(env: Env, caller: Address) -> Result<(), ClearinghouseError> {
        require_role(&env, Role::EmergencyShutdown, &caller)?;
        set_reentrancy_guard(&env)?;
        let mut facility = Facility::load(&env)?;
        let was_active = facility.state.funding.active;
        facility.state.funding.active = false;

        let shares = facility.vault().balance(&facility.this);
        if shares != 0 {
            let vault = facility.collaborators.vault.clone();
            facility.defund(&vault, shares)?;
        }
        let idle = facility.debt_token().balance(&facility.this);
        if idle != 0 {
            let debt = facility.collaborators.debt.clone();
            facility.defund(&debt, idle)?;
        }
        if was_active {
            RegistryClient::new(&env, &facility.collaborators.registry)
                .deactivate_clearinghouse(&facility.this);
        }

        publish_deactivated(
            &env,
            LifecycleEvent {
                caller,
                active: false,
                fund_time: facility.state.funding.fund_time,
            },
        );
        facility.commit();
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Return `amount` of `token` to the treasury (overseer only). Collateral
    /// cannot be defunded; it leaves only through `burn`.
    pub fn defund(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ClearinghouseError> {
        require_role(&env, Role::Overseer, &caller)?;
        if amount <= 0 {
            return Err(ClearinghouseError::InvalidAmount);
        }
        set_reentrancy_guard(&env)?;
        let facility = Facility::load(&env)?;
        facility.defund(&token, amount)?;
        clear_reentrancy_guard(&env);
        extend_instance_ttl(&env);
        Ok(())
    }

    // ── views ────────────────────────────────────────────────────────────────

    /// Receivables ledger and funding state in one read.
    pub fn facility_state(env: Env) -> Result<FacilityState, ClearinghouseError> {
        read_state(&env)
    }

    /// Outstanding principal booked on loans this facility originated.
    pub fn principal_receivables(env: Env) -> Result<i128, ClearinghouseError> {
        Ok(read_state(&env)?.receivables.principal)
    }

    /// Outstanding interest booked at origination, net of repayments and defaults.
    pub fn interest_receivables(env: Env) -> Result<i128, ClearinghouseError> {
        Ok(read_state(&env)?.receivables.interest)
    }

    /// Principal plus interest receivables.
    pub fn total_receivables(env: Env) -> Result<i128, ClearinghouseError> {
        Ok(read_state(&env)?.receivables.total())
    }

    /// Whether the facility is currently lending and funded.
    pub fn is_active(env: Env) -> Result<bool, ClearinghouseError> {
        Ok(read_state(&env)?.funding.active)
    }

    /// Earliest timestamp at which the next rebalance is due.
    pub fn fund_time(env: Env) -> Result<u64, ClearinghouseError> {
        Ok(read_state(&env)?.funding.fund_time)
    }

    /// Lending and funding terms fixed at init.
    pub fn terms(env: Env) -> Result<Terms, ClearinghouseError> {
        read_terms(&env)
    }

    /// Collaborator contract and token addresses fixed at init.
    pub fn collaborators(env: Env) -> Result<Collaborators, ClearinghouseError> {
        read_collaborators(&env)
    }

    /// Collateral required to borrow `principal`.
    pub fn collateral_for_loan(env: Env, principal: i128) -> Result<i128, ClearinghouseError> {
        let terms = read_terms(&env)?;
        Ok(pricing::collateral_for_principal(&env, &terms, principal))
    }

    /// Principal lent against `collateral` and the interest owed on it.
    pub fn loan_for_collateral(env: Env, collateral: i128) -> Result<(i128, i128), ClearinghouseError> {
        let terms = read_terms(&env)?;
        Ok(pricing::loan_for_collateral(&env, &terms, collateral))
    }

    /// Interest owed on `principal` over `duration` seconds.
    pub fn interest_for_loan(env: Env, principal: i128, duration: u64) -> Result<i128, ClearinghouseError> {
        let terms = read_terms(&env)?;
        Ok(pricing::interest_for(&env, &terms, principal, duration))
    }

    /// Keeper reward for a defaulted loan seizing `collateral`, `elapsed` seconds after expiry.
    pub fn keeper_reward(env: Env, collateral: i128, elapsed: u64) -> Result<i128, ClearinghouseError> {
        let terms = read_terms(&env)?;
        Ok(pricing::keeper_reward(&env, &terms, collateral, elapsed))
    }
}
