use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Topic pattern: ("ORACLE", symbol_short!("…")).

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReportPushedEvent {
    pub provider: Address,
    pub payload: u128,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReportOutOfRangeEvent {
    pub provider: Address,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ProviderEvent {
    pub provider: Address,
    pub added: bool,
    pub timestamp: u64,
}

pub fn emit_report_pushed(env: &Env, provider: Address, payload: u128, timestamp: u64) {
    env.events().publish(
        ("ORACLE", symbol_short!("PUSHED")),
        ReportPushedEvent {
            provider,
            payload,
            timestamp,
        },
    );
}

/// Published by `get_data` for every provider that had no report inside
/// the delay/expiration window.
pub fn emit_report_out_of_range(env: &Env, provider: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("OUT_RANGE")),
        ReportOutOfRangeEvent {
            provider,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_provider_added(env: &Env, provider: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("PROV_ADD")),
        ProviderEvent {
            provider,
            added: true,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_provider_removed(env: &Env, provider: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("PROV_DEL")),
        ProviderEvent {
            provider,
            added: false,
            timestamp: env.ledger().timestamp(),
        },
    );
}
