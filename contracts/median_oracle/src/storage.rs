use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::types::{DataKey, OracleConfig, Report, MAX_REPORT_EXPIRATION_TIME};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const REPORTS_BUMP_AMOUNT: u32 = 60 * DAY_IN_LEDGERS;
const REPORTS_LIFETIME_THRESHOLD: u32 = REPORTS_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<OracleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn write_config(env: &Env, config: &OracleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Loads the config and checks that `caller` is its owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<OracleConfig, Error> {
    let config = read_config(env)?;
    caller.require_auth();
    if *caller != config.owner {
        return Err(Error::AccessDenied);
    }
    Ok(config)
}

/// Fails with `NotProvider` unless `provider` is on the roster.
pub fn require_provider(env: &Env, provider: &Address) -> Result<(), Error> {
    read_config(env)?;
    provider.require_auth();
    if read_providers(env).first_index_of(provider).is_none() {
        return Err(Error::NotProvider);
    }
    Ok(())
}

pub fn validate_parameters(
    report_expiration_time_sec: u64,
    minimum_providers: u32,
) -> Result<(), Error> {
    if report_expiration_time_sec > MAX_REPORT_EXPIRATION_TIME || minimum_providers == 0 {
        return Err(Error::InvalidParameter);
    }
    Ok(())
}

pub fn read_providers(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Providers)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_providers(env: &Env, providers: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Providers, providers);
}

pub fn read_reports(env: &Env, provider: &Address) -> Vec<Report> {
    env.storage()
        .persistent()
        .get(&DataKey::Reports(provider.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_reports(env: &Env, provider: &Address, reports: &Vec<Report>) {
    let key = DataKey::Reports(provider.clone());
    env.storage().persistent().set(&key, reports);
    env.storage()
        .persistent()
        .extend_ttl(&key, REPORTS_LIFETIME_THRESHOLD, REPORTS_BUMP_AMOUNT);
}

pub fn remove_reports(env: &Env, provider: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Reports(provider.clone()));
}
