//! Core data types for the Clearinghouse contract.

use soroban_sdk::{contracterror, contracttype, Address};

use crate::pricing::{DAY, SCALE};

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ClearinghouseError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InvalidTerms = 5,
    IncompatibleCollaborator = 6,
    OnlyFromFactory = 7,
    BadEscrow = 8,
    NotLender = 9,
    LengthDiscrepancy = 10,
    OnlyBurnable = 11,
    AlreadyActive = 12,
    Reentrancy = 13,
    Overflow = 14,
}

/// Roles that gate the admin surface.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// May activate the facility and defund assets.
    Overseer = 0,
    /// May shut the facility down.
    EmergencyShutdown = 1,
}

/// Direction of a treasury rebalance.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RebalanceDirection {
    Fund = 0,
    Defund = 1,
}

/// Lending terms fixed at initialization.
///
/// * `interest_rate` – Annual rate, 1e18 scale (0.5% = 5e15).
/// * `loan_to_collateral` – Debt units lent per collateral unit, 1e18 scale.
/// * `duration` – Loan term in seconds.
/// * `fund_cadence` – Minimum seconds between two rebalances.
/// * `fund_amount` – Working capital ceiling in debt units.
/// * `max_reward` – Absolute cap on the keeper reward per defaulted loan, in collateral units.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Terms {
    pub interest_rate: i128,
    pub loan_to_collateral: i128,
    pub duration: u64,
    pub fund_cadence: u64,
    pub fund_amount: i128,
    pub max_reward: i128,
}

impl Terms {
    /// Production terms: 0.5% over 121 days at 2892.92 per collateral unit,
    /// 18M ceiling replenished weekly, 0.1 collateral max keeper reward.
    pub fn default_terms() -> Self {
        Terms {
            interest_rate: 5 * SCALE / 1_000,
            loan_to_collateral: 289_292 * SCALE / 100,
            duration: 121 * DAY,
            fund_cadence: 7 * DAY,
            fund_amount: 18_000_000 * SCALE,
            max_reward: SCALE / 10,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.interest_rate > 0
            && self.loan_to_collateral > 0
            && self.duration > 0
            && self.fund_cadence > 0
            && self.fund_amount > 0
            && self.max_reward > 0
    }
}

/// Contracts and tokens the facility talks to, injected once at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collaborators {
    /// Collateral token pledged by borrowers.
    pub collateral: Address,
    /// Debt token lent out.
    pub debt: Address,
    /// Yield-bearing vault over `debt`; also the share token.
    pub vault: Address,
    /// Token produced by unstaking collateral, burned on default.
    pub ohm: Address,
    pub staking: Address,
    pub minter: Address,
    pub treasury: Address,
    pub factory: Address,
    pub registry: Address,
}

/// Amounts owed to the facility by loans it wrote.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Receivables {
    pub principal: i128,
    pub interest: i128,
}

/// Funding state of the facility.
///
/// `fund_time` is the earliest timestamp at which the next rebalance may run.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FundingState {
    pub active: bool,
    pub fund_time: u64,
}

/// All mutable facility state, loaded and written back as one unit.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FacilityState {
    pub receivables: Receivables,
    pub funding: FundingState,
}

/// Loan request as recorded by a cooler escrow.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRequest {
    pub amount: i128,
    pub interest: i128,
    pub loan_to_collateral: i128,
    pub duration: u64,
    pub active: bool,
    pub requester: Address,
}

/// Loan as recorded by a cooler escrow.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub request: LoanRequest,
    pub principal: i128,
    pub interest_due: i128,
    pub collateral: i128,
    pub expiry: u64,
    pub lender: Address,
    pub recipient: Address,
    pub callback: bool,
}

/// Amounts seized by a cooler when a defaulted loan is claimed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefaultedClaim {
    pub principal: i128,
    pub interest: i128,
    pub collateral: i128,
    /// Seconds since the loan expired.
    pub elapsed: u64,
}
