use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::types::{DataKey, PolicyConfig, RebaseState, RebaseTiming};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

fn bump(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn read_config(env: &Env) -> Result<PolicyConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn write_config(env: &Env, config: &PolicyConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump(env);
}

pub fn read_timing(env: &Env) -> Result<RebaseTiming, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Timing)
        .ok_or(Error::NotInitialized)
}

pub fn write_timing(env: &Env, timing: &RebaseTiming) {
    env.storage().instance().set(&DataKey::Timing, timing);
    bump(env);
}

pub fn read_state(env: &Env) -> Result<RebaseState, Error> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn write_state(env: &Env, state: &RebaseState) {
    env.storage().instance().set(&DataKey::State, state);
    bump(env);
}

/// Loads the config after checking that `caller` signed and is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<PolicyConfig, Error> {
    let config = read_config(env)?;
    caller.require_auth();
    if *caller != config.owner {
        return Err(Error::AccessDenied);
    }
    Ok(config)
}
