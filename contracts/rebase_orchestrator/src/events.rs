use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TransactionAddedEvent {
    pub index: u32,
    pub destination: Address,
    pub function: Symbol,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TransactionRemovedEvent {
    pub index: u32,
    pub destination: Address,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TransactionToggledEvent {
    pub index: u32,
    pub enabled: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RebaseExecutedEvent {
    pub caller: Address,
    pub transactions_executed: u32,
}

pub fn emit_transaction_added(env: &Env, index: u32, destination: Address, function: Symbol) {
    env.events().publish(
        ("ORCH", symbol_short!("TX_ADD")),
        TransactionAddedEvent {
            index,
            destination,
            function,
        },
    );
}

pub fn emit_transaction_removed(env: &Env, index: u32, destination: Address) {
    env.events().publish(
        ("ORCH", symbol_short!("TX_DEL")),
        TransactionRemovedEvent { index, destination },
    );
}

pub fn emit_transaction_toggled(env: &Env, index: u32, enabled: bool) {
    env.events().publish(
        ("ORCH", symbol_short!("TX_TOGGLE")),
        TransactionToggledEvent { index, enabled },
    );
}

pub fn emit_rebase_executed(env: &Env, caller: Address, transactions_executed: u32) {
    env.events().publish(
        ("ORCH", symbol_short!("REBASE")),
        RebaseExecutedEvent {
            caller,
            transactions_executed,
        },
    );
}
