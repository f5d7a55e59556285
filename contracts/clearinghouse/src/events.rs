//! Event types and topic constants for the Clearinghouse contract.
//! Every event is published under the `clearing` topic followed by its kind.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::RebalanceDirection;

const TOPIC: Symbol = symbol_short!("clearing");

/// Emitted on activation and emergency shutdown.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LifecycleEvent {
    pub caller: Address,
    pub active: bool,
    pub fund_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefundEvent {
    pub token: Address,
    pub amount: i128,
}

/// Emitted when working capital is traded with the treasury.
/// `amount` is in debt units; `treasury_debt` is the debt record afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RebalanceEvent {
    pub direction: RebalanceDirection,
    pub amount: i128,
    pub treasury_debt: i128,
    pub next_fund_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OriginationEvent {
    pub cooler: Address,
    pub loan_id: u32,
    pub principal: i128,
    pub interest: i128,
    pub collateral: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionEvent {
    pub cooler: Address,
    pub loan_id: u32,
    pub times: u32,
    pub interest_paid: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepaymentEvent {
    pub cooler: Address,
    pub loan_id: u32,
    pub principal_paid: i128,
    pub interest_paid: i128,
}

/// Emitted once per default-claim batch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefaultClaimEvent {
    pub keeper: Address,
    pub loans: u32,
    pub principal: i128,
    pub interest: i128,
    pub collateral: i128,
    pub keeper_reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnEvent {
    pub collateral: i128,
    pub burned: i128,
}

pub fn publish_activated(env: &Env, event: LifecycleEvent) {
    env.events().publish((TOPIC, symbol_short!("activate")), event);
}

pub fn publish_deactivated(env: &Env, event: LifecycleEvent) {
    env.events().publish((TOPIC, symbol_short!("shutdown")), event);
}

pub fn publish_defund(env: &Env, event: DefundEvent) {
    env.events().publish((TOPIC, symbol_short!("defund")), event);
}

pub fn publish_rebalance(env: &Env, event: RebalanceEvent) {
    env.events().publish((TOPIC, symbol_short!("rebalance")), event);
}

pub fn publish_origination(env: &Env, event: OriginationEvent) {
    env.events().publish((TOPIC, symbol_short!("originate")), event);
}

pub fn publish_extension(env: &Env, event: ExtensionEvent) {
    env.events().publish((TOPIC, symbol_short!("extend")), event);
}

pub fn publish_repayment(env: &Env, event: RepaymentEvent) {
    env.events().publish((TOPIC, symbol_short!("repay")), event);
}

pub fn publish_default_claim(env: &Env, event: DefaultClaimEvent) {
    env.events().publish((TOPIC, symbol_short!("default")), event);
}

pub fn publish_burn(env: &Env, event: BurnEvent) {
    env.events().publish((TOPIC, symbol_short!("burn")), event);
}
