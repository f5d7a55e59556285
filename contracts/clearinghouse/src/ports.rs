//! Interfaces of the contracts the Clearinghouse calls into.

use soroban_sdk::{contractclient, Address, Env};

use crate::types::{DefaultedClaim, Loan};

/// Protocol treasury holding reserves and the per-debtor debt record.
#[contractclient(name = "TreasuryClient")]
pub trait Treasury {
    fn reserve_debt(env: Env, asset: Address, debtor: Address) -> i128;
    fn set_debt(env: Env, debtor: Address, asset: Address, amount: i128);
    fn increase_withdraw_approval(env: Env, spender: Address, asset: Address, amount: i128);
    fn withdraw_reserves(env: Env, to: Address, asset: Address, amount: i128);
}

/// Yield-bearing wrapper over the debt token. The vault contract is also the
/// share token, so share balances move through `balance` / `transfer`.
#[contractclient(name = "YieldVaultClient")]
pub trait YieldVault {
    fn asset(env: Env) -> Address;
    /// Pulls `assets` from `from` through an allowance and mints shares to `receiver`.
    fn deposit(env: Env, from: Address, assets: i128, receiver: Address) -> i128;
    /// Burns shares of `owner` and sends exactly `assets` to `receiver`.
    fn withdraw(env: Env, assets: i128, receiver: Address, owner: Address) -> i128;
    fn preview_withdraw(env: Env, assets: i128) -> i128;
    fn preview_redeem(env: Env, shares: i128) -> i128;
    fn max_withdraw(env: Env, owner: Address) -> i128;
    fn balance(env: Env, id: Address) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
}

/// Mint authority for the burnable token produced by unstaking.
#[contractclient(name = "MintAuthorityClient")]
pub trait MintAuthority {
    /// Burns `amount` from `from` through an allowance granted to the authority.
    fn burn_ohm(env: Env, from: Address, amount: i128);
}

#[contractclient(name = "StakingClient")]
pub trait Staking {
    /// Pulls `amount` staked collateral from `owner` through an allowance and
    /// returns the burnable amount sent back to `owner`.
    fn unstake(env: Env, owner: Address, amount: i128, trigger: bool, rebasing: bool) -> i128;
}

#[contractclient(name = "CoolerFactoryClient")]
pub trait CoolerFactory {
    fn created(env: Env, cooler: Address) -> bool;
}

/// Loan escrow. One cooler per borrower and token pair.
#[contractclient(name = "CoolerClient")]
pub trait Cooler {
    fn collateral(env: Env) -> Address;
    fn debt(env: Env) -> Address;
    fn collateral_for(env: Env, amount: i128, loan_to_collateral: i128) -> i128;
    /// Pulls the collateral from `from` through an allowance and opens a request.
    fn request_loan(
        env: Env,
        from: Address,
        amount: i128,
        interest: i128,
        loan_to_collateral: i128,
        duration: u64,
    ) -> u32;
    /// Funds request `req_id` from `lender` through an allowance and returns the loan id.
    fn clear_request(env: Env, req_id: u32, lender: Address, is_callback: bool) -> u32;
    fn extend_loan_terms(env: Env, loan_id: u32, times: u32);
    fn claim_defaulted(env: Env, loan_id: u32) -> DefaultedClaim;
    fn get_loan(env: Env, loan_id: u32) -> Loan;
}

/// Registry of active clearinghouses.
#[contractclient(name = "RegistryClient")]
pub trait Registry {
    fn activate_clearinghouse(env: Env, clearinghouse: Address);
    fn deactivate_clearinghouse(env: Env, clearinghouse: Address);
}
