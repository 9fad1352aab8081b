use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::{RebaseRecord, RebaseTiming};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReferenceUpdatedEvent {
    pub reference: Address,
}

pub fn emit_log_rebase(env: &Env, record: &RebaseRecord) {
    env.events()
        .publish(("POLICY", symbol_short!("REBASE")), record.clone());
}

pub fn emit_market_oracle_set(env: &Env, reference: Address) {
    env.events().publish(
        ("POLICY", symbol_short!("MKT_ORCL")),
        ReferenceUpdatedEvent { reference },
    );
}

pub fn emit_index_oracle_set(env: &Env, reference: Address) {
    env.events().publish(
        ("POLICY", symbol_short!("IDX_ORCL")),
        ReferenceUpdatedEvent { reference },
    );
}

pub fn emit_orchestrator_set(env: &Env, reference: Address) {
    env.events().publish(
        ("POLICY", symbol_short!("ORCH")),
        ReferenceUpdatedEvent { reference },
    );
}

pub fn emit_timing_set(env: &Env, timing: &RebaseTiming) {
    env.events()
        .publish(("POLICY", symbol_short!("TIMING")), timing.clone());
}
