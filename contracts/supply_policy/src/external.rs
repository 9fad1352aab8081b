//! Calls into the oracles and the ledger. Any failure of the callee is
//! folded into this contract's own error so the whole rebase reverts.

use soroban_sdk::{symbol_short, vec, Address, Env, IntoVal, Symbol, Vec};

use crate::errors::Error;

fn oracle_reading(env: &Env, oracle: &Address) -> Option<(u128, bool)> {
    match env.try_invoke_contract::<(u128, bool), Error>(
        oracle,
        &Symbol::new(env, "get_data"),
        Vec::new(env),
    ) {
        Ok(Ok(reading)) => Some(reading),
        _ => None,
    }
}

pub fn market_rate(env: &Env, oracle: &Address) -> Result<u128, Error> {
    match oracle_reading(env, oracle) {
        Some((rate, true)) => Ok(rate),
        _ => Err(Error::InvalidMarketData),
    }
}

pub fn index_value(env: &Env, oracle: &Address) -> Result<u128, Error> {
    match oracle_reading(env, oracle) {
        Some((value, true)) => Ok(value),
        _ => Err(Error::InvalidIndexData),
    }
}

pub fn total_supply(env: &Env, ledger: &Address) -> Result<i128, Error> {
    match env.try_invoke_contract::<i128, Error>(
        ledger,
        &Symbol::new(env, "total_supply"),
        Vec::new(env),
    ) {
        Ok(Ok(supply)) => Ok(supply),
        _ => Err(Error::LedgerFailure),
    }
}

pub fn apply_rebase(env: &Env, ledger: &Address, epoch: u64, delta: i128) -> Result<i128, Error> {
    let args = vec![env, epoch.into_val(env), delta.into_val(env)];
    match env.try_invoke_contract::<i128, Error>(ledger, &symbol_short!("rebase"), args) {
        Ok(Ok(supply)) => Ok(supply),
        _ => Err(Error::LedgerFailure),
    }
}
