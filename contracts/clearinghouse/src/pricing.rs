//! Loan pricing and keeper reward math.
//!
//! All amounts are 1e18 fixed point and every division truncates. The order of
//! operations matches the published formulas so that rounding is reproducible:
//!
//! * `collateral = principal * 1e18 / loan_to_collateral`
//! * `principal  = collateral * loan_to_collateral / 1e18`
//! * `interest   = principal * (interest_rate * duration / YEAR) / 1e18`

use soroban_sdk::{panic_with_error, Env, I256};

use crate::types::{ClearinghouseError, Terms};

pub const SCALE: i128 = 1_000_000_000_000_000_000;
pub const DAY: u64 = 86_400;
pub const YEAR: u64 = 365 * DAY;

/// Keeper reward vests linearly over this window after loan expiry.
pub const REWARD_RAMP: u64 = 7 * DAY;
/// Percentage cap on the keeper reward, 1e18 scale (5%).
pub const REWARD_COLLATERAL_SHARE: i128 = 5 * SCALE / 100;

/// `a * b / denominator`, truncating. Falls back to 256-bit intermediates when
/// the product does not fit in `i128`.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> i128 {
    if denominator == 0 {
        panic_with_error!(env, ClearinghouseError::Overflow);
    }
    if let Some(product) = a.checked_mul(b) {
        return product / denominator;
    }
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .unwrap_or_else(|| panic_with_error!(env, ClearinghouseError::Overflow))
}

pub fn collateral_for_principal(env: &Env, terms: &Terms, principal: i128) -> i128 {
    mul_div(env, principal, SCALE, terms.loan_to_collateral)
}

/// Principal lent against `collateral` and the interest owed on it over a full term.
pub fn loan_for_collateral(env: &Env, terms: &Terms, collateral: i128) -> (i128, i128) {
    let principal = mul_div(env, collateral, terms.loan_to_collateral, SCALE);
    let interest = interest_for(env, terms, principal, terms.duration);
    (principal, interest)
}

pub fn interest_for(env: &Env, terms: &Terms, principal: i128, duration: u64) -> i128 {
    let interest_percent = mul_div(env, terms.interest_rate, duration as i128, YEAR as i128);
    mul_div(env, principal, interest_percent, SCALE)
}

/// Reward paid to the keeper for claiming a defaulted loan.
///
/// Capped by both 5% of the seized collateral and `max_reward`, then ramped
/// linearly from zero at expiry to the full cap after `REWARD_RAMP`.
pub fn keeper_reward(env: &Env, terms: &Terms, collateral: i128, elapsed: u64) -> i128 {
    let share_cap = mul_div(env, collateral, REWARD_COLLATERAL_SHARE, SCALE);
    let cap = share_cap.min(terms.max_reward);
    if elapsed < REWARD_RAMP {
        mul_div(env, cap, elapsed as i128, REWARD_RAMP as i128)
    } else {
        cap
    }
}
