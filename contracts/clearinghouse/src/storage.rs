//! Instance storage layout and accessors.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{ClearinghouseError, Collaborators, FacilityState, Role, Terms};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Collaborators,
    Terms,
    State,
    Role(Role, Address),
    Reentrancy,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(env: &Env) -> Result<Address, ClearinghouseError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ClearinghouseError::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_collaborators(env: &Env) -> Result<Collaborators, ClearinghouseError> {
    env.storage()
        .instance()
        .get(&DataKey::Collaborators)
        .ok_or(ClearinghouseError::NotInitialized)
}

pub fn write_collaborators(env: &Env, collaborators: &Collaborators) {
    env.storage()
        .instance()
        .set(&DataKey::Collaborators, collaborators);
}

pub fn read_terms(env: &Env) -> Result<Terms, ClearinghouseError> {
    env.storage()
        .instance()
        .get(&DataKey::Terms)
        .ok_or(ClearinghouseError::NotInitialized)
}

pub fn write_terms(env: &Env, terms: &Terms) {
    env.storage().instance().set(&DataKey::Terms, terms);
}

pub fn read_state(env: &Env) -> Result<FacilityState, ClearinghouseError> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(ClearinghouseError::NotInitialized)
}

/// Commits the staged facility state. Called once at the end of each entry point.
pub fn write_state(env: &Env, state: &FacilityState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Role(role, account.clone()))
        .unwrap_or(false)
}

pub fn write_role(env: &Env, role: Role, account: &Address, granted: bool) {
    let key = DataKey::Role(role, account.clone());
    if granted {
        env.storage().instance().set(&key, &true);
    } else {
        env.storage().instance().remove(&key);
    }
}

/// Requires `caller` to have authorized the invocation and to hold `role`.
pub fn require_role(env: &Env, role: Role, caller: &Address) -> Result<(), ClearinghouseError> {
    caller.require_auth();
    if !has_role(env, role, caller) {
        return Err(ClearinghouseError::Unauthorized);
    }
    Ok(())
}

pub fn require_admin_auth(env: &Env) -> Result<Address, ClearinghouseError> {
    let admin = read_admin(env)?;
    admin.require_auth();
    Ok(admin)
}

pub fn set_reentrancy_guard(env: &Env) -> Result<(), ClearinghouseError> {
    let current: bool = env
        .storage()
        .instance()
        .get(&DataKey::Reentrancy)
        .unwrap_or(false);
    if current {
        return Err(ClearinghouseError::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Reentrancy, &true);
    Ok(())
}

pub fn clear_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&DataKey::Reentrancy, &false);
}

#[cfg(test)]
pub fn is_reentrancy_guard_set(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Reentrancy)
        .unwrap_or(false)
}
