use soroban_sdk::{contracttype, Address};

/// Upper bound for `report_expiration_time_sec` (520 weeks).
pub const MAX_REPORT_EXPIRATION_TIME: u64 = 520 * 7 * 24 * 60 * 60;

/// Ring size of a provider's report history.
pub const REPORTS_PER_PROVIDER: u32 = 2;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Report {
    pub provider: Address,
    pub timestamp: u64,
    pub payload: u128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct OracleConfig {
    pub owner: Address,
    // Reports older than this are ignored by get_data.
    pub report_expiration_time_sec: u64,
    // Reports younger than this are ignored by get_data.
    pub report_delay_sec: u64,
    pub minimum_providers: u32,
}

#[contracttype]
pub enum DataKey {
    Config,
    // Vec<Address>, insertion ordered until a swap-pop removal
    Providers,
    // Vec<Report>, oldest first, at most REPORTS_PER_PROVIDER
    Reports(Address),
}
