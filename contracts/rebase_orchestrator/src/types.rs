use soroban_sdk::{contracttype, Address, Symbol, Val, Vec};

/// How the current `rebase` invocation was reached. Only a top-level call
/// may drive the policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CallOrigin {
    External,
    Nested,
}

/// A call executed after every successful policy rebase.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TransactionEntry {
    pub destination: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
    pub enabled: bool,
}

#[contracttype]
pub enum DataKey {
    Owner,
    Policy,
    Transactions,
}
